//! Renders diagnostics as annotated source snippets.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'a> {
    diagnostics: &'a [DiagnosticMessage],
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: &'a [DiagnosticMessage], source: &'a str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    /// Name shown in the ` --> name:line:col` header.
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One report per diagnostic, separated by a blank line.
    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let reports: Vec<String> = self
            .diagnostics
            .iter()
            .map(|diag| renderer.render(&self.report(diag)).to_string())
            .collect();
        reports.join("\n")
    }

    /// Title group with the primary and related spans, plus a help group
    /// showing the patched source when the diagnostic carries a fix.
    fn report(&self, diag: &'a DiagnosticMessage) -> Vec<Group<'a>> {
        let primary = self.caret_range(diag.range);

        let mut snippet = Snippet::source(self.source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(primary.clone())
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(self.caret_range(related.range))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let mut report = vec![level.primary_title(&diag.message).element(snippet)];

        if let Some(fix) = &diag.fix {
            let patched = Snippet::source(self.source)
                .line_start(1)
                .patch(Patch::new(primary, &fix.replacement));
            report.push(Level::HELP.secondary_title(&fix.description).element(patched));
        }

        report
    }

    /// Empty ranges (end of input) are widened to one column so the caret shows.
    fn caret_range(&self, range: TextRange) -> Range<usize> {
        let start: usize = range.start().into();
        let end: usize = range.end().into();
        if start == end {
            return start..(start + 1).min(self.source.len());
        }
        start..end
    }
}

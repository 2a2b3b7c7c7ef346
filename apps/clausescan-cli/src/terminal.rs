//! Terminal view surface.
//!
//! Prints lifecycle transitions and renders the result tree as indented text.
//! Control characters in server-provided strings are replaced so sentence
//! text cannot drive the terminal.

use std::io::Write;

use clause_core::{Region, ResultBody, ViewSurface, VisualTree};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable clause listing
    Text,
    /// Leave stdout to the caller, which prints the raw result. Status and
    /// error lines go to stderr.
    Json,
}

pub struct TerminalSurface<W> {
    out: W,
    mode: OutputMode,
    file_label: String,
    error_text: String,
    results: Option<VisualTree>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            file_label: String::new(),
            error_text: String::new(),
            results: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    /// Status and error lines; stderr in JSON mode so stdout stays parseable
    fn status(&mut self, text: &str) {
        match self.mode {
            OutputMode::Text => self.emit(text),
            OutputMode::Json => eprintln!("{}", text),
        }
    }
}

impl<W: Write> ViewSurface for TerminalSurface<W> {
    fn set_region_visible(&mut self, region: Region, visible: bool) {
        if !visible {
            return;
        }
        match region {
            Region::Idle => {}
            Region::Loading => {
                if self.mode == OutputMode::Text {
                    let line = format!("Analyzing {}...", sanitize(&self.file_label));
                    self.emit(&line);
                } else {
                    debug!(file = %self.file_label, "analyzing");
                }
            }
            Region::Error => {
                let line = format!("Error: {}", sanitize(&self.error_text));
                self.status(&line);
            }
            Region::Results => {
                if self.mode == OutputMode::Text {
                    if let Some(tree) = self.results.take() {
                        let text = format_tree(&tree);
                        self.emit(text.trim_end());
                        self.results = Some(tree);
                    }
                }
            }
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        trace!(enabled, "submit control");
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text = message.to_string();
    }

    fn set_validation_message(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            self.status(message);
        }
    }

    fn set_file_label(&mut self, label: &str) {
        self.file_label = label.to_string();
    }

    fn replace_results(&mut self, tree: &VisualTree) {
        self.results = Some(tree.clone());
    }
}

/// Render a result tree as plain text
pub fn format_tree(tree: &VisualTree) -> String {
    let mut out = String::new();
    out.push_str(&format!("Document: {}\n", sanitize(&tree.filename)));
    out.push_str(&format!("Clauses found: {}\n", tree.total));

    match &tree.body {
        ResultBody::Placeholder { message } => {
            out.push('\n');
            out.push_str(message);
            out.push('\n');
        }
        ResultBody::Groups { groups } => {
            for group in groups {
                out.push_str(&format!(
                    "\n{} ({})\n",
                    sanitize(&group.label),
                    group.badge
                ));
                for (idx, sentence) in group.items.iter().enumerate() {
                    out.push_str(&format!("  {}. {}\n", idx + 1, sanitize(sentence)));
                }
            }
        }
    }

    out
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clause_core::render;
    use clause_types::AnalysisResult;
    use pretty_assertions::assert_eq;

    fn scenario_a() -> AnalysisResult {
        AnalysisResult::from_json(
            r#"{"filename":"contract.pdf","total_clauses_found":2,
                "clauses":{"termination_clause":["Either party may terminate with 30 days notice."],
                           "confidentiality":["All data shall remain confidential."]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_groups() {
        let text = format_tree(&render(&scenario_a()));
        assert_eq!(
            text,
            "Document: contract.pdf\n\
             Clauses found: 2\n\
             \n\
             termination clause (1 instance)\n  \
             1. Either party may terminate with 30 days notice.\n\
             \n\
             confidentiality (1 instance)\n  \
             1. All data shall remain confidential.\n"
        );
    }

    #[test]
    fn test_format_placeholder() {
        let body = r#"{"filename":"a.pdf","total_clauses_found":0,"clauses":{}}"#;
        let result = AnalysisResult::from_json(body).unwrap();
        let text = format_tree(&render(&result));
        assert!(text.contains("Clauses found: 0"));
        assert!(text.contains(clause_core::render::NO_CLAUSES_MESSAGE));
    }

    #[test]
    fn test_escape_sequences_are_neutralized() {
        let result = AnalysisResult::from_json(
            "{\"filename\":\"a.pdf\",\"total_clauses_found\":1,\
              \"clauses\":{\"payment\":[\"Pay \\u001b[31mnow\\u001b[0m\"]}}",
        )
        .unwrap();
        let text = format_tree(&render(&result));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("Pay  [31mnow [0m"));
    }

    #[test]
    fn test_results_printed_only_in_text_mode() {
        let tree = render(&scenario_a());

        let mut text = TerminalSurface::new(Vec::new(), OutputMode::Text);
        text.replace_results(&tree);
        text.set_region_visible(Region::Results, true);
        assert!(String::from_utf8_lossy(text.output()).contains("termination clause"));

        let mut json = TerminalSurface::new(Vec::new(), OutputMode::Json);
        json.replace_results(&tree);
        json.set_region_visible(Region::Results, true);
        assert!(json.output().is_empty());
    }

    #[test]
    fn test_json_mode_keeps_stdout_clean() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputMode::Json);
        surface.set_file_label("contract.pdf");
        surface.set_region_visible(Region::Loading, true);
        surface.set_error_text("file is not a valid PDF");
        surface.set_region_visible(Region::Error, true);
        surface.set_validation_message(Some("Please select a PDF file first"));

        assert!(surface.output().is_empty());
    }

    #[test]
    fn test_error_and_loading_lines() {
        let mut surface = TerminalSurface::new(Vec::new(), OutputMode::Text);
        surface.set_file_label("contract.pdf");
        surface.set_region_visible(Region::Loading, true);
        surface.set_error_text("file is not a valid PDF");
        surface.set_region_visible(Region::Error, true);
        surface.set_region_visible(Region::Error, false);

        assert_eq!(
            String::from_utf8_lossy(surface.output()),
            "Analyzing contract.pdf...\nError: file is not a valid PDF\n"
        );
    }
}

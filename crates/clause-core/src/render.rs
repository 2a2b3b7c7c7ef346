//! Result rendering
//!
//! Turns the server's clause map into a [`VisualTree`]: a summary (filename and
//! total) plus either a fixed placeholder or one group per clause category.
//! Front ends only walk the tree; they never look at the raw result.
//!
//! All strings in the tree are plain text. Sentences come straight from the
//! analyzed document and must be inserted as text nodes, never as markup.

use clause_types::AnalysisResult;
use serde::Serialize;

/// Placeholder shown instead of groups when the server reports zero matches
pub const NO_CLAUSES_MESSAGE: &str = "No specific clauses were identified in this document.";

/// Display structure for one analysis result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualTree {
    /// Echoed document name
    pub filename: String,
    /// Server-reported total, converted to text and nothing else
    pub total: String,
    pub body: ResultBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultBody {
    Placeholder { message: String },
    Groups { groups: Vec<ClauseGroup> },
}

/// One clause category block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseGroup {
    /// Raw category identifier, e.g. `termination_clause`
    pub category: String,
    /// Human-readable label, e.g. `termination clause`
    pub label: String,
    /// Count badge, e.g. `1 instance`
    pub badge: String,
    /// Matched sentences, in server order
    pub items: Vec<String>,
}

impl VisualTree {
    pub fn groups(&self) -> &[ClauseGroup] {
        match &self.body {
            ResultBody::Groups { groups } => groups,
            ResultBody::Placeholder { .. } => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, ResultBody::Placeholder { .. })
    }
}

/// Build the display tree for `result`.
///
/// A reported total of zero always yields the placeholder, even if `clauses`
/// is non-empty. Any other total iterates `clauses` in order, so a non-zero
/// total over an empty map gives zero groups while the summary still echoes
/// the server figure.
pub fn render(result: &AnalysisResult) -> VisualTree {
    let body = if result.total_clauses_found == 0 {
        ResultBody::Placeholder {
            message: NO_CLAUSES_MESSAGE.to_string(),
        }
    } else {
        let groups = result
            .clauses
            .iter()
            .map(|entry| ClauseGroup {
                category: entry.category.clone(),
                label: category_label(&entry.category),
                badge: count_badge(entry.sentences.len()),
                items: entry.sentences.clone(),
            })
            .collect();
        ResultBody::Groups { groups }
    };

    VisualTree {
        filename: result.filename.clone(),
        total: result.total_clauses_found.to_string(),
        body,
    }
}

/// `termination_clause` -> `termination clause`
pub fn category_label(category: &str) -> String {
    category.replace('_', " ")
}

/// Singular only for exactly one
pub fn count_badge(count: usize) -> String {
    if count == 1 {
        "1 instance".to_string()
    } else {
        format!("{} instances", count)
    }
}

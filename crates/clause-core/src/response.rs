//! Interpretation of the analysis endpoint's HTTP response
//!
//! Transport-independent: both the browser `fetch` adapter and the native
//! `reqwest` adapter hand the status code and raw body text to
//! [`interpret_response`].

use clause_types::{AnalysisResult, ErrorBody};
use tracing::{debug, warn};

use crate::error::AnalysisError;

/// Map a status code and body to the submission outcome.
///
/// - 2xx: the body must match the analysis schema, else the outcome is a
///   [`AnalysisError::MalformedResponse`].
/// - anything else: [`AnalysisError::Server`] carrying the body's `error`
///   string when there is one.
pub fn interpret_response(status: u16, body: &str) -> Result<AnalysisResult, AnalysisError> {
    if !(200..300).contains(&status) {
        let message = ErrorBody::message_from(body);
        debug!(status, has_message = message.is_some(), "analysis rejected");
        return Err(AnalysisError::Server { status, message });
    }

    let result = AnalysisResult::from_json(body)?;
    if result.is_inconsistent() {
        warn!(
            reported = result.total_clauses_found,
            counted = result.counted_matches(),
            "reported clause total disagrees with clause map"
        );
    }
    Ok(result)
}

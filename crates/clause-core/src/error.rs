//! Error types for one analysis submission

use clause_types::SchemaError;
use thiserror::Error;

/// Shown inline when the form is submitted without a file
pub const NO_FILE_MESSAGE: &str = "Please select a PDF file first";

/// Shown when the server rejects the upload without an `error` message
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// Shown for transport and parse failures
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing the file";

/// Every way a submission can fail.
///
/// `Display` carries the diagnostic detail for logs.
/// [`AnalysisError::user_message`] is what reaches the error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("server rejected the upload with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Text for the error banner
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::NoFileSelected => NO_FILE_MESSAGE.to_string(),
            AnalysisError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            AnalysisError::Server { message: None, .. } => UPLOAD_FAILED_MESSAGE.to_string(),
            AnalysisError::Transport(_) | AnalysisError::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl From<SchemaError> for AnalysisError {
    fn from(err: SchemaError) -> Self {
        AnalysisError::MalformedResponse(err.to_string())
    }
}

use thiserror::Error;

/// A response body that could not be read as the declared structure
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("response is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("response does not match the analysis schema: {0}")]
    Mismatch(#[source] serde_json::Error),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                SchemaError::NotJson(err)
            }
            _ => SchemaError::Mismatch(err),
        }
    }
}

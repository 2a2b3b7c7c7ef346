//! Wire types shared by every ClauseScan front end
//!
//! The analysis service answers `POST /api/upload` with a JSON document that
//! lists detected clause categories and the sentences that matched them.
//! Everything here is validated at the boundary: a body that does not match
//! the declared shape is rejected with a [`SchemaError`] instead of flowing
//! into rendering.

pub mod error;
pub mod types;

pub use error::SchemaError;
pub use types::{
    AnalysisResult, ClauseEntry, ClauseMap, ErrorBody, HealthStatus, UPLOAD_FIELD_NAME,
};

//! Toolkit-independent core of the ClauseScan client
//!
//! ## Architecture
//!
//! - [`controller::UploadController`] owns the one-shot request lifecycle:
//!   validate the selection, show loading, await the analyzer, dispatch the
//!   outcome, settle the loading indicator.
//! - [`presenter::StatusPresenter`] keeps the four view regions mutually
//!   exclusive on top of any [`presenter::ViewSurface`] (DOM, terminal, test
//!   recorder).
//! - [`render::render`] turns an [`clause_types::AnalysisResult`] into a
//!   [`render::VisualTree`].
//!
//! Everything runs on one thread. The analyzer call is the only suspension
//! point, so the controller uses `Cell`/`RefCell` and never holds a borrow
//! across an `.await`.

pub mod controller;
pub mod error;
pub mod presenter;
pub mod render;
pub mod response;
pub mod state;

pub use controller::{AnalysisRequest, Analyzer, SubmitOutcome, UploadController};
pub use error::{AnalysisError, GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE, UPLOAD_FAILED_MESSAGE};
pub use presenter::{StatusPresenter, ViewSurface, NO_FILE_LABEL};
pub use render::{category_label, count_badge, render, ClauseGroup, ResultBody, VisualTree};
pub use response::interpret_response;
pub use state::{Region, RegionVisibility, UiState};

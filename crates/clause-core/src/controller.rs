//! Upload controller
//!
//! Owns the lifecycle of one analysis submission:
//!
//! ```text
//! Idle    --submit(no file)--> Idle (inline validation message)
//! Idle    --submit(file)-----> Loading
//! Loading --success----------> Results
//! Loading --failure----------> Error
//! Results --submit-----------> Loading (previous results discarded)
//! Error   --submit-----------> Loading (previous error cleared)
//! ```
//!
//! Every submission gets a generation number. A completion whose generation is
//! no longer the latest is dropped without touching the view, so out-of-order
//! completions can never overwrite a newer submission.

use std::cell::{Cell, Ref, RefCell};

use async_trait::async_trait;
use clause_types::AnalysisResult;
use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::presenter::{StatusPresenter, ViewSurface};
use crate::render::render;
use crate::state::UiState;

/// The selected document, owned by the in-flight request
#[derive(Debug, Clone)]
pub struct AnalysisRequest<B> {
    /// Declared name of the attachment
    pub filename: String,
    /// Raw document (bytes, a browser `File`, ...)
    pub body: B,
}

impl<B> AnalysisRequest<B> {
    pub fn new(filename: impl Into<String>, body: B) -> Self {
        Self {
            filename: filename.into(),
            body,
        }
    }
}

/// Remote analysis service.
///
/// One call is one multipart POST of `request.body` under the `file` field.
/// No timeout is imposed here; the call resolves whenever the transport does.
#[async_trait(?Send)]
pub trait Analyzer {
    type Body;

    async fn analyze(
        &self,
        request: AnalysisRequest<Self::Body>,
    ) -> Result<AnalysisResult, AnalysisError>;
}

/// How a call to [`UploadController::submit`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No file selected; nothing was sent
    Invalid,
    Results,
    Error,
    /// A newer submission started before this one resolved
    Superseded,
}

pub struct UploadController<A, V> {
    analyzer: A,
    presenter: RefCell<StatusPresenter<V>>,
    state: RefCell<UiState>,
    generation: Cell<u64>,
}

impl<A: Analyzer, V: ViewSurface> UploadController<A, V> {
    pub fn new(analyzer: A, surface: V) -> Self {
        Self {
            analyzer,
            presenter: RefCell::new(StatusPresenter::new(surface)),
            state: RefCell::new(UiState::Idle),
            generation: Cell::new(0),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn state(&self) -> Ref<'_, UiState> {
        self.state.borrow()
    }

    pub fn presenter(&self) -> Ref<'_, StatusPresenter<V>> {
        self.presenter.borrow()
    }

    /// True while a submission is awaiting the analyzer
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Number of submissions that reached the analyzer
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// File picker changed
    pub fn file_selected(&self, filename: Option<&str>) {
        let mut presenter = self.presenter.borrow_mut();
        presenter.show_file_label(filename);
        if filename.is_some() {
            presenter.hide_validation();
        }
    }

    /// Run one submission to completion.
    ///
    /// Without a selection this fails synchronously with an inline validation
    /// message and never reaches Loading. Otherwise the loading indicator is
    /// cleared and the submit control re-enabled exactly once when this
    /// submission settles, whichever way it ends.
    pub async fn submit(&self, selection: Option<AnalysisRequest<A::Body>>) -> SubmitOutcome {
        let Some(request) = selection else {
            return self.reject_empty();
        };

        let generation = self.begin(&request.filename);
        let _settle = Settle {
            controller: self,
            generation,
        };

        let outcome = self.analyzer.analyze(request).await;

        if generation != self.generation.get() {
            debug!(
                generation,
                latest = self.generation.get(),
                "discarding stale analysis completion"
            );
            return SubmitOutcome::Superseded;
        }

        self.dispatch(outcome)
    }

    fn reject_empty(&self) -> SubmitOutcome {
        debug!("submission without a selected file");
        self.presenter
            .borrow_mut()
            .show_validation(&AnalysisError::NoFileSelected.user_message());
        SubmitOutcome::Invalid
    }

    fn begin(&self, filename: &str) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        info!(generation, filename, "submitting document for analysis");

        let mut presenter = self.presenter.borrow_mut();
        presenter.hide_validation();
        presenter.hide_error();
        presenter.hide_results();
        presenter.show_loading();
        *self.state.borrow_mut() = UiState::Loading;
        generation
    }

    fn dispatch(&self, outcome: Result<AnalysisResult, AnalysisError>) -> SubmitOutcome {
        let mut presenter = self.presenter.borrow_mut();
        match outcome {
            Ok(result) => {
                info!(
                    filename = %result.filename,
                    total = result.total_clauses_found,
                    categories = result.clauses.len(),
                    "analysis complete"
                );
                let tree = render(&result);
                presenter.show_results(&tree);
                *self.state.borrow_mut() = UiState::Results(result);
                SubmitOutcome::Results
            }
            Err(err) => {
                warn!(error = %err, "analysis failed");
                let message = err.user_message();
                presenter.show_error(&message);
                *self.state.borrow_mut() = UiState::Error(message);
                SubmitOutcome::Error
            }
        }
    }

    /// Clear the loading indicator if `generation` is still the latest
    /// submission. A submission dropped mid-flight falls back to Idle.
    fn settle(&self, generation: u64) {
        if generation != self.generation.get() {
            return;
        }
        if let Ok(mut presenter) = self.presenter.try_borrow_mut() {
            presenter.hide_loading();
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.is_loading() {
                debug!(generation, "submission dropped before completion");
                *state = UiState::Idle;
            }
        }
    }
}

/// Runs [`UploadController::settle`] on every exit path of a submission,
/// including the future being dropped while awaiting the analyzer
struct Settle<'a, A: Analyzer, V: ViewSurface> {
    controller: &'a UploadController<A, V>,
    generation: u64,
}

impl<A: Analyzer, V: ViewSurface> Drop for Settle<'_, A, V> {
    fn drop(&mut self) {
        self.controller.settle(self.generation);
    }
}

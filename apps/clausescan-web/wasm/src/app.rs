//! Page wiring: form submit and file picker events into the controller

use std::rc::Rc;

use clause_core::{AnalysisRequest, SubmitOutcome, UploadController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, File, HtmlFormElement, HtmlInputElement};

use crate::dom::{required, DomIds, DomSurface};
use crate::fetch::FetchAnalyzer;

type Controller = UploadController<FetchAnalyzer, DomSurface>;

/// The mounted upload page
#[wasm_bindgen]
pub struct ClauseScanApp {
    controller: Rc<Controller>,
    // Listeners stay registered for as long as the app is alive
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl ClauseScanApp {
    /// Mount on the current document.
    ///
    /// `endpoint` defaults to `/api/upload` on the page's origin.
    #[wasm_bindgen(constructor)]
    pub fn new(endpoint: Option<String>) -> Result<ClauseScanApp, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let form: HtmlFormElement = required(&document, DomIds::FORM)?;
        let file_input: HtmlInputElement = required(&document, DomIds::FILE_INPUT)?;
        let surface = DomSurface::lookup(&document)?;

        let analyzer = endpoint
            .filter(|e| !e.is_empty())
            .map(FetchAnalyzer::new)
            .unwrap_or_default();
        let controller = Rc::new(UploadController::new(analyzer, surface));

        let on_submit = {
            let controller = Rc::clone(&controller);
            let file_input = file_input.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                let selection = selected_file(&file_input)
                    .map(|file| AnalysisRequest::new(file.name(), file));
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    let outcome = controller.submit(selection).await;
                    if outcome == SubmitOutcome::Superseded {
                        web_sys::console::log_1(&"Ignored a stale analysis response".into());
                    }
                });
            })
        };
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;

        let on_change = {
            let controller = Rc::clone(&controller);
            let file_input = file_input.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let name = selected_file(&file_input).map(|file| file.name());
                controller.file_selected(name.as_deref());
            })
        };
        file_input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;

        web_sys::console::log_1(&"ClauseScan mounted".into());

        Ok(Self {
            controller,
            _listeners: vec![on_submit, on_change],
        })
    }

    /// True while an analysis request is in flight
    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Current state name: "idle", "loading", "error" or "results"
    #[wasm_bindgen(js_name = stateName)]
    pub fn state_name(&self) -> String {
        use clause_core::UiState;
        match &*self.controller.state() {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Error(_) => "error",
            UiState::Results(_) => "results",
        }
        .to_string()
    }

    /// The displayed result as JSON, when the results region is showing
    #[wasm_bindgen(js_name = getResultJson)]
    pub fn get_result_json(&self) -> Option<String> {
        match &*self.controller.state() {
            clause_core::UiState::Results(result) => serde_json::to_string(result).ok(),
            _ => None,
        }
    }
}

fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

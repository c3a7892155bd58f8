//! WASM bridge exposing the Chaoslab core state machine to a JS frontend.
//!
//! JS owns the event loop and the HTTP transport. Navigation calls hand
//! back fetch tokens; JS performs the request and echoes the token along
//! with the result, and the core silently drops anything stale. All state
//! mutation goes through this bridge, so the JS layer stays a thin render
//! loop over the snapshots returned here.

use chaoslab_core::form::SimForm;
use chaoslab_core::lifecycle::{Controller, DetailSlot, HistorySlot, View};
use chaoslab_core::registry::{self, ModelId};
use chaoslab_core::run::{RunId, RunRecord, RunSummary, Trajectory};
use chaoslab_core::viz::VizMode;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmApp {
    form: SimForm,
    controller: Controller,
}

/// Form snapshot handed to the render layer.
#[derive(Serialize)]
struct FormView<'a> {
    model: &'static str,
    label: &'static str,
    fields: Vec<FieldView>,
    initial_text: &'a str,
    steps: u32,
    color: &'a str,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct FieldView {
    name: &'static str,
    value: f64,
}

#[derive(Serialize)]
struct ModelChoice {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum HistoryView<'a> {
    Idle,
    Loading,
    Loaded { rows: &'a [RunSummary] },
    Failed { error: &'a str },
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum DetailView<'a> {
    Idle,
    Loading { run: RunId },
    Loaded { record: &'a RunRecord },
    Failed { run: RunId, error: &'a str },
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl WasmApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmApp {
        console_error_panic_hook::set_once();
        WasmApp {
            form: SimForm::new(),
            controller: Controller::new(),
        }
    }

    /// The model choices for the create form's select input.
    pub fn model_choices(&self) -> Result<JsValue, JsValue> {
        let choices: Vec<ModelChoice> = ModelId::ALL
            .iter()
            .map(|&id| {
                let desc = registry::descriptor(id);
                ModelChoice {
                    value: id.as_str(),
                    label: desc.label,
                }
            })
            .collect();
        to_value(&choices).map_err(js_err)
    }

    // --- Parameter form ---

    pub fn select_model(&mut self, id: &str) -> Result<(), JsValue> {
        let id: ModelId = id.parse().map_err(js_err)?;
        self.form.select_model(id);
        self.controller.clear_form_error();
        Ok(())
    }

    pub fn set_param(&mut self, field: &str, value: f64) -> Result<(), JsValue> {
        self.form.set_param(field, value).map_err(js_err)
    }

    pub fn set_initial_text(&mut self, text: &str) {
        self.form.set_initial_text(text);
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.form.set_steps(steps);
    }

    pub fn set_color(&mut self, color: &str) {
        self.form.set_color(color);
    }

    pub fn form_state(&self) -> Result<JsValue, JsValue> {
        let desc = registry::descriptor(self.form.model());
        let view = FormView {
            model: self.form.model().as_str(),
            label: desc.label,
            fields: self
                .form
                .params()
                .fields()
                .into_iter()
                .map(|(name, value)| FieldView { name, value })
                .collect(),
            initial_text: self.form.initial_text(),
            steps: self.form.steps(),
            color: self.form.color(),
            error: self.controller.form_error(),
        };
        to_value(&view).map_err(js_err)
    }

    // --- Submission ---

    /// Validates the form and returns the request body for JS to POST.
    /// On validation failure the message is recorded on the form state and
    /// returned as the error.
    pub fn begin_submit(&mut self) -> Result<JsValue, JsValue> {
        let request = self.controller.submit(&self.form).map_err(js_err)?;
        to_value(&request).map_err(js_err)
    }

    pub fn submit_ok(&mut self, record: JsValue) -> Result<(), JsValue> {
        let record: RunRecord = from_value(record).map_err(js_err)?;
        self.controller.submission_succeeded(record);
        Ok(())
    }

    pub fn submit_err(&mut self, message: &str) {
        self.controller.submission_failed(message);
    }

    // --- Navigation ---

    pub fn show_compose(&mut self) {
        self.controller.show_compose();
    }

    /// Returns the token of the history fetch JS must now perform.
    pub fn show_history(&mut self) -> u32 {
        self.controller.show_history().token
    }

    pub fn back_to_history(&mut self) -> u32 {
        self.controller.back_to_history().token
    }

    /// Returns the token of the detail fetch to perform, or `undefined`
    /// when the same run's fetch is already in flight.
    pub fn select_run(&mut self, run: u32) -> Option<u32> {
        self.controller.select_run(run).map(|fetch| fetch.token)
    }

    pub fn history_ok(&mut self, token: u32, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<RunSummary> = from_value(rows).map_err(js_err)?;
        self.controller.history_loaded(token, rows);
        Ok(())
    }

    pub fn history_err(&mut self, token: u32, message: &str) {
        self.controller.history_failed(token, message);
    }

    pub fn detail_ok(&mut self, token: u32, record: JsValue) -> Result<(), JsValue> {
        let record: RunRecord = from_value(record).map_err(js_err)?;
        self.controller.detail_loaded(token, record);
        Ok(())
    }

    pub fn detail_err(&mut self, token: u32, message: &str) {
        self.controller.detail_failed(token, message);
    }

    // --- Render snapshots ---

    pub fn view(&self) -> String {
        match self.controller.view() {
            View::Compose => "compose".to_string(),
            View::HistoryList => "history".to_string(),
            View::RunDetail(_) => "detail".to_string(),
        }
    }

    pub fn selected_run(&self) -> Option<u32> {
        match self.controller.view() {
            View::RunDetail(run) => Some(run),
            _ => None,
        }
    }

    pub fn history_state(&self) -> Result<JsValue, JsValue> {
        let view = match self.controller.history() {
            HistorySlot::Idle => HistoryView::Idle,
            HistorySlot::Loading { .. } => HistoryView::Loading,
            HistorySlot::Loaded(rows) => HistoryView::Loaded { rows },
            HistorySlot::Failed(error) => HistoryView::Failed { error },
        };
        to_value(&view).map_err(js_err)
    }

    pub fn detail_state(&self) -> Result<JsValue, JsValue> {
        let view = match self.controller.detail() {
            DetailSlot::Idle => DetailView::Idle,
            DetailSlot::Loading { run, .. } => DetailView::Loading { run: *run },
            DetailSlot::Loaded(record) => DetailView::Loaded { record },
            DetailSlot::Failed { run, message } => DetailView::Failed {
                run: *run,
                error: message,
            },
        };
        to_value(&view).map_err(js_err)
    }

    // --- Visualization ---

    pub fn legal_modes(&self) -> Vec<String> {
        self.controller
            .legal_modes()
            .iter()
            .map(|mode| mode.as_str().to_string())
            .collect()
    }

    pub fn current_mode(&self) -> Option<String> {
        self.controller
            .viz()
            .map(|viz| viz.mode().as_str().to_string())
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = VizMode::parse(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown visualization mode '{mode}'")))?;
        self.controller.set_mode(mode);
        Ok(())
    }

    /// The planar projection of the loaded trajectory under the active
    /// mode, as an array of [x, y] pairs. `null` in the 3-D mode or when
    /// nothing is loaded.
    pub fn projection(&mut self) -> Result<JsValue, JsValue> {
        match self.controller.projection() {
            Some(pairs) => to_value(&pairs).map_err(js_err),
            None => Ok(JsValue::NULL),
        }
    }

    /// The raw channels for the 3-D renderer. `null` unless a record with
    /// a third axis is loaded.
    pub fn points_3d(&self) -> Result<JsValue, JsValue> {
        let trajectory: Option<&Trajectory> = self
            .controller
            .record()
            .map(|record| &record.results)
            .filter(|t| t.z.is_some());
        match trajectory {
            Some(t) => to_value(t).map_err(js_err),
            None => Ok(JsValue::NULL),
        }
    }
}

impl Default for WasmApp {
    fn default() -> Self {
        WasmApp::new()
    }
}

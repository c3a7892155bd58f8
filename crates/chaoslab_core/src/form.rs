//! Parameter form state for composing a new run.
//!
//! The form owns the currently selected model, its typed parameter set, and
//! the raw initial-condition text. Switching models is a full reset to that
//! model's defaults; parameter sets are not comparable across models, so no
//! edits survive the switch.

use serde::Serialize;

use crate::error::Error;
use crate::params::ModelParams;
use crate::registry::{self, ModelId};

const DEFAULT_COLOR: &str = "#0000ff";

#[derive(Debug, Clone, Serialize)]
pub struct SimForm {
    model: ModelId,
    params: ModelParams,
    initial_text: String,
    steps: u32,
    color: String,
}

impl SimForm {
    /// A fresh form, seeded with the Lorenz defaults.
    pub fn new() -> SimForm {
        let mut form = SimForm {
            model: ModelId::Lorenz,
            params: ModelParams::defaults(ModelId::Lorenz),
            initial_text: String::new(),
            steps: 0,
            color: DEFAULT_COLOR.to_string(),
        };
        form.select_model(ModelId::Lorenz);
        form
    }

    /// Switches the active model and resets params, initial-condition text,
    /// and steps to that model's defaults. Color is a display preference
    /// and survives the switch.
    pub fn select_model(&mut self, id: ModelId) {
        let desc = registry::descriptor(id);
        self.model = id;
        self.params = ModelParams::defaults(id);
        self.initial_text = join_defaults(desc.initial_defaults);
        self.steps = desc.default_steps;
    }

    /// Updates a single parameter field. Any finite number is accepted;
    /// plausibility is the compute collaborator's concern.
    pub fn set_param(&mut self, field: &str, value: f64) -> Result<(), Error> {
        self.params.set(field, value)
    }

    /// Stores the initial-condition text verbatim. It is not parsed until
    /// submission, so partially typed input never produces transient
    /// errors.
    pub fn set_initial_text(&mut self, text: impl Into<String>) {
        self.initial_text = text.into();
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn initial_text(&self) -> &str {
        &self.initial_text
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl Default for SimForm {
    fn default() -> Self {
        SimForm::new()
    }
}

fn join_defaults(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Static table of supported models.
//!
//! Every other component consults this registry for a model's parameter
//! schema, initial-condition arity, and presentation defaults. The table is
//! fixed at compile time and never mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a supported dynamical system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Lorenz,
    Henon,
    Thomas,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [ModelId::Lorenz, ModelId::Henon, ModelId::Thomas];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Lorenz => "lorenz",
            ModelId::Henon => "henon",
            ModelId::Thomas => "thomas",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lorenz" => Ok(ModelId::Lorenz),
            "henon" => Ok(ModelId::Henon),
            "thomas" => Ok(ModelId::Thomas),
            other => Err(Error::UnknownModel(other.to_string())),
        }
    }
}

/// One named numeric field in a model's parameter schema.
#[derive(Debug, Clone, Copy)]
pub struct ParamField {
    pub name: &'static str,
    pub default: f64,
}

/// Immutable description of one model: its parameter schema and the
/// defaults seeded into the form when the model is selected.
#[derive(Debug, Clone, Copy)]
pub struct ModelDescriptor {
    pub id: ModelId,
    pub label: &'static str,
    /// Ordered list of parameter fields as rendered in the create form.
    pub param_fields: &'static [ParamField],
    /// Required number of initial-condition components (2 or 3).
    pub initial_arity: usize,
    pub initial_defaults: &'static [f64],
    pub default_steps: u32,
    /// True iff trajectories of this model carry a `z` channel.
    pub has_third_axis: bool,
    /// Canonical presentation: whether the 3-D view is listed (and thus
    /// selected) first when the model supports one.
    pub three_d_first: bool,
}

const LORENZ: ModelDescriptor = ModelDescriptor {
    id: ModelId::Lorenz,
    label: "Lorenz Attractor",
    param_fields: &[
        ParamField { name: "sigma", default: 10.0 },
        ParamField { name: "rho", default: 28.0 },
        ParamField { name: "beta", default: 8.0 / 3.0 },
        ParamField { name: "dt", default: 0.01 },
    ],
    initial_arity: 3,
    initial_defaults: &[1.0, 1.0, 1.0],
    default_steps: 50_000,
    has_third_axis: true,
    three_d_first: true,
};

const HENON: ModelDescriptor = ModelDescriptor {
    id: ModelId::Henon,
    label: "Henon Map",
    param_fields: &[
        ParamField { name: "a", default: 1.4 },
        ParamField { name: "b", default: 0.3 },
    ],
    initial_arity: 2,
    initial_defaults: &[0.1, 0.3],
    default_steps: 1_000,
    has_third_axis: false,
    three_d_first: false,
};

const THOMAS: ModelDescriptor = ModelDescriptor {
    id: ModelId::Thomas,
    label: "Thomas Attractor",
    param_fields: &[
        ParamField { name: "b", default: 0.18 },
        ParamField { name: "dt", default: 0.01 },
    ],
    initial_arity: 3,
    initial_defaults: &[0.0, 0.0, 1.0],
    default_steps: 50_000,
    has_third_axis: true,
    three_d_first: true,
};

/// Looks up the descriptor for a model id.
pub fn descriptor(id: ModelId) -> &'static ModelDescriptor {
    match id {
        ModelId::Lorenz => &LORENZ,
        ModelId::Henon => &HENON,
        ModelId::Thomas => &THOMAS,
    }
}

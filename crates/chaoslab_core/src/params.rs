//! Model-specific parameter sets as a tagged union.
//!
//! Each model carries a distinct parameter shape; code that touches
//! parameters dispatches on the variant rather than assuming a shared
//! layout. The wire format embeds the initial-condition vector inside the
//! parameter object, so serialization is untagged and the variant is
//! recovered from the field names.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::registry::ModelId;

fn default_dt() -> f64 {
    0.01
}

/// Typed parameters for one model, including its initial conditions. The
/// fixed-size `initial` arrays enforce the arity invariant structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelParams {
    Lorenz {
        sigma: f64,
        rho: f64,
        beta: f64,
        initial: [f64; 3],
        #[serde(default = "default_dt")]
        dt: f64,
    },
    Henon {
        a: f64,
        b: f64,
        initial: [f64; 2],
    },
    Thomas {
        b: f64,
        initial: [f64; 3],
        #[serde(default = "default_dt")]
        dt: f64,
    },
}

impl ModelParams {
    /// Default parameter set for a model, matching the registry's field
    /// defaults and initial-condition defaults.
    pub fn defaults(id: ModelId) -> ModelParams {
        match id {
            ModelId::Lorenz => ModelParams::Lorenz {
                sigma: 10.0,
                rho: 28.0,
                beta: 8.0 / 3.0,
                initial: [1.0, 1.0, 1.0],
                dt: 0.01,
            },
            ModelId::Henon => ModelParams::Henon {
                a: 1.4,
                b: 0.3,
                initial: [0.1, 0.3],
            },
            ModelId::Thomas => ModelParams::Thomas {
                b: 0.18,
                initial: [0.0, 0.0, 1.0],
                dt: 0.01,
            },
        }
    }

    pub fn model_id(&self) -> ModelId {
        match self {
            ModelParams::Lorenz { .. } => ModelId::Lorenz,
            ModelParams::Henon { .. } => ModelId::Henon,
            ModelParams::Thomas { .. } => ModelId::Thomas,
        }
    }

    /// Ordered (name, value) pairs, in the schema order of the registry.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match *self {
            ModelParams::Lorenz {
                sigma,
                rho,
                beta,
                dt,
                ..
            } => vec![("sigma", sigma), ("rho", rho), ("beta", beta), ("dt", dt)],
            ModelParams::Henon { a, b, .. } => vec![("a", a), ("b", b)],
            ModelParams::Thomas { b, dt, .. } => vec![("b", b), ("dt", dt)],
        }
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|&(_, value)| value)
    }

    /// Sets a single named field. No range validation happens here; any
    /// finite value the user types is accepted and plausibility is left to
    /// the compute collaborator.
    pub fn set(&mut self, field: &str, value: f64) -> Result<(), Error> {
        let slot = match self {
            ModelParams::Lorenz {
                sigma,
                rho,
                beta,
                dt,
                ..
            } => match field {
                "sigma" => Some(sigma),
                "rho" => Some(rho),
                "beta" => Some(beta),
                "dt" => Some(dt),
                _ => None,
            },
            ModelParams::Henon { a, b, .. } => match field {
                "a" => Some(a),
                "b" => Some(b),
                _ => None,
            },
            ModelParams::Thomas { b, dt, .. } => match field {
                "b" => Some(b),
                "dt" => Some(dt),
                _ => None,
            },
        };
        match slot {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UnknownParam {
                model: self.model_id().as_str(),
                field: field.to_string(),
            }),
        }
    }

    /// The initial-condition vector, in order.
    pub fn initial(&self) -> &[f64] {
        match self {
            ModelParams::Lorenz { initial, .. } => initial,
            ModelParams::Henon { initial, .. } => initial,
            ModelParams::Thomas { initial, .. } => initial,
        }
    }

    /// Replaces the initial-condition vector. The slice length must match
    /// the model's arity.
    pub fn set_initial(&mut self, values: &[f64]) -> Result<(), Error> {
        let expected = self.initial().len();
        if values.len() != expected {
            return Err(Error::InvalidInitialConditions {
                expected,
                got: values.len(),
            });
        }
        match self {
            ModelParams::Lorenz { initial, .. } => initial.copy_from_slice(values),
            ModelParams::Henon { initial, .. } => initial.copy_from_slice(values),
            ModelParams::Thomas { initial, .. } => initial.copy_from_slice(values),
        }
        Ok(())
    }
}

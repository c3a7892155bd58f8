//! Wire types for submitted runs and their results.
//!
//! Field names mirror the compute service's JSON API (`model_type`,
//! `created_at`, `is_stable`, `input_params`, `results`).

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::params::ModelParams;
use crate::registry::ModelId;
use crate::viz::Axis;

/// Server-assigned run identifier.
pub type RunId = u32;

/// A fully assembled, structurally valid request for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub model: ModelId,
    pub steps: u32,
    pub color: String,
    pub params: ModelParams,
}

impl RunRequest {
    /// The initial-condition vector carried inside `params`.
    pub fn initial(&self) -> &[f64] {
        self.params.initial()
    }
}

/// One row of the run history listing (a run minus its trajectory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: RunId,
    pub model_type: ModelId,
    pub created_at: String,
    pub is_stable: bool,
}

/// A completed run: the originating request plus the computed trajectory
/// and the collaborator's stability classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: RunId,
    pub model_type: ModelId,
    pub created_at: String,
    pub is_stable: bool,
    pub input_params: RunRequest,
    pub results: Trajectory,
}

impl RunRecord {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            id: self.id,
            model_type: self.model_type,
            created_at: self.created_at.clone(),
            is_stable: self.is_stable,
        }
    }
}

/// Computed state-space samples for one run. `z` is present iff the
/// originating model carries a third axis; all present channels have equal
/// length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
    pub color: String,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The samples of a spatial channel. `T` is synthetic (the sample
    /// index) and has no backing channel here.
    pub fn channel(&self, axis: Axis) -> Result<&[f64], Error> {
        match axis {
            Axis::X => Ok(&self.x),
            Axis::Y => Ok(&self.y),
            Axis::Z => self
                .z
                .as_deref()
                .ok_or(Error::UnsupportedAxis(Axis::Z)),
            Axis::T => Err(Error::UnsupportedAxis(Axis::T)),
        }
    }
}

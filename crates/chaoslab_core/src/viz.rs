//! Visualization modes and trajectory projections.
//!
//! The legal mode set is a function of the model: 2-D models get the three
//! planar projections, 3-D models additionally get `Z-T` and a 3-D view.
//! Mode ordering follows the model's canonical presentation (attractors
//! lead with the 3-D view) and the first legal mode is the default
//! selection whenever a new record is loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::registry::{self, ModelDescriptor, ModelId};
use crate::run::Trajectory;

/// A trajectory channel, plus the synthetic time axis `T` (sample index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    T,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::T => "t",
        };
        f.write_str(name)
    }
}

/// One way of presenting a loaded trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VizMode {
    ThreeD,
    XY,
    XT,
    YT,
    ZT,
}

impl VizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VizMode::ThreeD => "3D",
            VizMode::XY => "X-Y",
            VizMode::XT => "X-T",
            VizMode::YT => "Y-T",
            VizMode::ZT => "Z-T",
        }
    }

    pub fn parse(s: &str) -> Option<VizMode> {
        match s {
            "3D" => Some(VizMode::ThreeD),
            "X-Y" => Some(VizMode::XY),
            "X-T" => Some(VizMode::XT),
            "Y-T" => Some(VizMode::YT),
            "Z-T" => Some(VizMode::ZT),
            _ => None,
        }
    }

    /// The (horizontal, vertical) axes of a planar mode. `None` for the
    /// 3-D view, which is rendered from the raw channels instead of a
    /// projection.
    pub fn axes(&self) -> Option<(Axis, Axis)> {
        match self {
            VizMode::ThreeD => None,
            VizMode::XY => Some((Axis::X, Axis::Y)),
            VizMode::XT => Some((Axis::T, Axis::X)),
            VizMode::YT => Some((Axis::T, Axis::Y)),
            VizMode::ZT => Some((Axis::T, Axis::Z)),
        }
    }
}

impl fmt::Display for VizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered set of modes a model's trajectories may be viewed in. The
/// first entry is the default selection.
pub fn legal_modes(desc: &ModelDescriptor) -> &'static [VizMode] {
    use VizMode::*;
    if desc.initial_arity == 2 || !desc.has_third_axis {
        &[XY, XT, YT]
    } else if desc.three_d_first {
        &[ThreeD, XY, XT, YT, ZT]
    } else {
        &[XY, XT, YT, ZT, ThreeD]
    }
}

/// Projects a trajectory onto a pair of axes as (x, y) pairs. The `T`
/// axis is the 0-based sample index. Pure; re-invoked on every mode
/// change.
pub fn project(
    trajectory: &Trajectory,
    axis_x: Axis,
    axis_y: Axis,
) -> Result<Vec<(f64, f64)>, Error> {
    let horizontal = resolve(trajectory, axis_x)?;
    let vertical = resolve(trajectory, axis_y)?;
    Ok((0..trajectory.len())
        .map(|i| (horizontal.sample(i), vertical.sample(i)))
        .collect())
}

enum Channel<'a> {
    Data(&'a [f64]),
    Index,
}

impl Channel<'_> {
    fn sample(&self, i: usize) -> f64 {
        match self {
            Channel::Data(samples) => samples[i],
            Channel::Index => i as f64,
        }
    }
}

fn resolve(trajectory: &Trajectory, axis: Axis) -> Result<Channel<'_>, Error> {
    match axis {
        Axis::T => Ok(Channel::Index),
        spatial => trajectory.channel(spatial).map(Channel::Data),
    }
}

/// The active visualization mode for one loaded record. Illegal
/// selections fall back to the model's default mode rather than failing
/// the render.
#[derive(Debug, Clone, PartialEq)]
pub struct VizSelection {
    mode: VizMode,
    legal: &'static [VizMode],
}

impl VizSelection {
    pub fn for_model(id: ModelId) -> VizSelection {
        let legal = legal_modes(registry::descriptor(id));
        VizSelection {
            mode: legal[0],
            legal,
        }
    }

    pub fn mode(&self) -> VizMode {
        self.mode
    }

    pub fn legal(&self) -> &'static [VizMode] {
        self.legal
    }

    pub fn select(&mut self, mode: VizMode) {
        if self.legal.contains(&mode) {
            self.mode = mode;
        } else {
            self.mode = self.legal[0];
        }
    }

    /// Resets to the model's default mode (the first legal one).
    pub fn reset(&mut self) {
        self.mode = self.legal[0];
    }
}

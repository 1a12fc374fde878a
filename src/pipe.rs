use crate::{
    error::ConfigError,
    tracker::{RotationState, TrackerSettings},
};
use std::fmt::Display;

/// Simulated head movement, set from the UI.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct HeadMotion {
    /// Degrees per second around the vertical axis.
    pub yaw_rate: f32,
    /// Degrees, positive looks down.
    pub pitch: f32,
    /// Degrees, positive tips the right ear up.
    pub roll: f32,
}

impl Default for HeadMotion {
    fn default() -> Self { Self { yaw_rate: 45.0, pitch: 10.0, roll: 0.0 } }
}

pub enum UI2Head {
    /// Shuts the background down.
    Shutdown,
    /// Starts feeding samples into the tracker.
    Start,
    /// Replaces the tracker settings.
    UpdateTracker(TrackerSettings),
    UpdateMotion(HeadMotion),
    /// Drops all accumulated rotation.
    Recenter,
}

pub enum HeadFailure {
    /// The tracker refused its settings. Previous settings are still in use.
    Settings(ConfigError),
    /// The UI hung up before the head client was started.
    Disconnected,
}

impl Display for HeadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadFailure::Settings(err) => write!(f, "Tracker settings rejected: {}", err),
            HeadFailure::Disconnected => write!(f, "Frontend disconnected."),
        }
    }
}

pub enum Head2UI {
    /// Head client is ticking the tracker.
    Running,
    /// Something went wrong on the head side.
    Failure(HeadFailure),
    /// Latest twist, along with the tracker state that produced it (for display).
    TwistUpdate { twist: f32, state: RotationState },
}

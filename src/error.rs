use thiserror::Error;

/// Rejected configuration. Raised when values are set, never mid-tick.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("radius must be greater than zero (got {0})")]
    NonPositiveRadius(f32),
    #[error("inner circle ratio must be within [0, 1] (got {0})")]
    InnerRatioOutOfRange(f32),
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("petal count must be at least 1")]
    NoPetals,
    #[error("line resolution must be at least 1")]
    NoLineResolution,
    #[error("curve point count must be at least 1")]
    NoCurvePoints,
    #[error("max vertical distance must be greater than zero (got {0})")]
    NonPositiveMaxYDist(f32),
    #[error("max turns must be at least 1")]
    NoTurns,
}

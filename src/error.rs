//! Error types for gauge configuration, drawing targets and the window host.

use crate::config::GaugeId;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, GaugeError>;

/// Root error type for the gauge dashboard
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    /// The value range is empty, inverted or not finite
    #[error("gauge `{id}` has an invalid range: min {min} must be below max {max}")]
    InvalidRange { id: GaugeId, min: f64, max: f64 },

    /// A tick step is zero, negative or not finite
    #[error("gauge `{id}` has an invalid {kind} tick step {step}")]
    InvalidTickStep {
        id: GaugeId,
        kind: &'static str,
        step: f64,
    },

    /// Frame-rate cap is zero, negative or not finite
    #[error("invalid frame-rate cap {0}")]
    InvalidFramerate(f64),

    #[error("unknown gauge `{0}`")]
    UnknownGauge(GaugeId),

    #[error("gauge `{0}` is already registered")]
    DuplicateGauge(GaugeId),

    /// No drawing surface is registered under the identifier
    #[error("no drawing surface named `{0}`")]
    MissingSurface(String),

    /// No label sink is registered under the identifier
    #[error("no label named `{0}`")]
    MissingLabel(String),

    #[error("failed to load font: {0}")]
    Font(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Pixels(#[from] pixels::Error),
}

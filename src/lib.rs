//! Animated radial gauges for periodically refreshed sensor values.
//!
//! A gauge maps a scalar onto a configurable arc and is painted as a
//! background arc, labelled major ticks, minor ticks, a needle, a hub and a
//! textual readout. New readings are eased in over a fixed duration by the
//! [`AnimationController`], one frame per host tick.
//!
//! ```no_run
//! use sensor_gauges::{Dashboard, RandomSensorFeed};
//!
//! fn main() -> sensor_gauges::Result<()> {
//!     Dashboard::with_defaults(RandomSensorFeed::new())?.show()
//! }
//! ```

// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod board;
pub mod canvas;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod sensor;
pub mod surface;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use animation::{
    AnimationController, Clock, GaugeState, GaugeStore, ManualClock, SystemClock,
    DEFAULT_DURATION,
};
pub use board::{Board, GaugeHost};
pub use canvas::{Canvas, Viewport};
pub use config::{Color, DashboardConfig, GaugeConfig, GaugeId, GaugeStyle};
pub use dashboard::Dashboard;
pub use error::{GaugeError, Result};
pub use render::{
    format_label, major_ticks, minor_ticks, needle_angle, render_gauge, value_ratio, Tick,
};
pub use sensor::{update_gauges, RandomSensorFeed, SensorFeed, SensorReadings};
pub use surface::{DrawCommand, LabelSink, Point, Scene, Stroke, Surface};

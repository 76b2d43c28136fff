use bon::Builder;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GaugeError, Result};

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const DARK_GRAY: Color = Color::new(0x33, 0x33, 0x33);
    pub const LIGHT_GRAY: Color = Color::new(0xcc, 0xcc, 0xcc);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ============================================================================
// GAUGE IDENTITY
// ============================================================================

/// Stable name of a gauge, e.g. `temp`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GaugeId(String);

impl GaugeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GaugeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GaugeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for GaugeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// GAUGE STYLE
// ============================================================================

/// Pixel geometry and colours of a single gauge face.
///
/// Offsets are measured inward from `radius`.
#[derive(Debug, Clone, Builder)]
pub struct GaugeStyle {
    #[builder(default = 100.0)]
    pub radius: f64,

    // Background arc
    #[builder(default = 15.0)]
    pub arc_width: f32,
    #[builder(default = Color::DARK_GRAY)]
    pub arc_color: Color,

    // Major ticks and their labels
    #[builder(default = 10.0)]
    pub major_tick_inner_offset: f64,
    #[builder(default = 3.0)]
    pub major_tick_width: f32,
    #[builder(default = Color::WHITE)]
    pub major_tick_color: Color,
    #[builder(default = 30.0)]
    pub tick_label_offset: f64,
    #[builder(default = 12.0)]
    pub tick_label_font_size: f32,
    #[builder(default = Color::WHITE)]
    pub tick_label_color: Color,

    // Minor ticks
    #[builder(default = 15.0)]
    pub minor_tick_inner_offset: f64,
    #[builder(default = 5.0)]
    pub minor_tick_outer_offset: f64,
    #[builder(default = 1.5)]
    pub minor_tick_width: f32,
    #[builder(default = Color::LIGHT_GRAY)]
    pub minor_tick_color: Color,

    // Needle and hub
    #[builder(default = 40.0)]
    pub needle_offset: f64,
    #[builder(default = 4.0)]
    pub needle_width: f32,
    #[builder(default = Color::RED)]
    pub needle_color: Color,
    #[builder(default = 5.0)]
    pub dot_radius: f64,
    #[builder(default = Color::WHITE)]
    pub dot_color: Color,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// GAUGE CONFIGURATION
// ============================================================================

/// Numeric and angular configuration of one gauge. Immutable once registered.
///
/// Angles are in degrees, measured clockwise from the positive x axis as on a
/// y-down drawing surface.
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(into)]
    pub id: GaugeId,
    pub min: f64,
    pub max: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[builder(into)]
    pub unit: String,
    #[builder(default = 10.0)]
    pub tick_step: f64,
    #[builder(default = 50.0)]
    pub minor_tick_step: f64,
    #[builder(into)]
    pub canvas: Option<String>,
    #[builder(into)]
    pub label: Option<String>,
    #[builder(default)]
    pub style: GaugeStyle,
}

impl GaugeConfig {
    /// Ambient temperature, -10..100 °C over the upper half circle
    pub fn temperature() -> Self {
        Self::builder()
            .id("temp")
            .min(-10.0)
            .max(100.0)
            .start_angle(-180.0)
            .end_angle(0.0)
            .unit("°C")
            .tick_step(10.0)
            .minor_tick_step(2.0)
            .build()
    }

    /// Relative humidity, 0..100 % over the upper half circle
    pub fn humidity() -> Self {
        Self::builder()
            .id("humi")
            .min(0.0)
            .max(100.0)
            .start_angle(-180.0)
            .end_angle(0.0)
            .unit("%")
            .tick_step(10.0)
            .minor_tick_step(2.0)
            .build()
    }

    /// CO concentration, 0..1600 ppm over a 250° sweep
    pub fn co() -> Self {
        Self::builder()
            .id("co")
            .min(0.0)
            .max(1600.0)
            .start_angle(-125.0)
            .end_angle(125.0)
            .unit("ppm")
            .tick_step(200.0)
            .minor_tick_step(50.0)
            .build()
    }

    /// The three gauges shown by the dashboard, in display order
    pub fn defaults() -> Vec<Self> {
        vec![Self::temperature(), Self::humidity(), Self::co()]
    }

    /// Identifier of the drawing surface this gauge paints on
    pub fn canvas_id(&self) -> String {
        self.canvas
            .clone()
            .unwrap_or_else(|| format!("gauge-{}", self.id))
    }

    /// Identifier of the text sink receiving the readout
    pub fn label_id(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("label-{}", self.id))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(GaugeError::InvalidRange {
                id: self.id.clone(),
                min: self.min,
                max: self.max,
            });
        }
        for (kind, step) in [("major", self.tick_step), ("minor", self.minor_tick_step)] {
            if !(step.is_finite() && step > 0.0) {
                return Err(GaugeError::InvalidTickStep {
                    id: self.id.clone(),
                    kind,
                    step,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// DASHBOARD CONFIGURATION
// ============================================================================

/// Window and pacing configuration of the gauge dashboard
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    #[builder(default = "Sensor Gauges".to_string())]
    pub title: String,

    // Layout: gauges sit side by side, each above its label strip
    #[builder(default = 250)]
    pub panel_width: usize,
    #[builder(default = 250)]
    pub panel_height: usize,
    #[builder(default = 40)]
    pub label_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Pacing
    #[builder(default = Duration::from_secs(5))]
    pub update_interval: Duration,
    #[builder(default = Duration::from_millis(500))]
    pub animation_duration: Duration,

    // Colours and fonts
    #[builder(default = Color::new(0x11, 0x11, 0x11))]
    pub background_color: Color,
    #[builder(default = Color::WHITE)]
    pub label_color: Color,
    #[builder(default = 20.0)]
    pub label_font_size: f32,
    pub font_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_framerate.is_finite() && self.max_framerate > 0.0) {
            return Err(GaugeError::InvalidFramerate(self.max_framerate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in GaugeConfig::defaults() {
            config.validate().unwrap();
        }
    }

    #[test]
    fn identifiers_default_from_gauge_id() {
        let config = GaugeConfig::temperature();
        assert_eq!(config.canvas_id(), "gauge-temp");
        assert_eq!(config.label_id(), "label-temp");

        let custom = GaugeConfig::builder()
            .id("x")
            .min(0.0)
            .max(1.0)
            .start_angle(0.0)
            .end_angle(90.0)
            .unit("u")
            .canvas("left")
            .label("left-text")
            .build();
        assert_eq!(custom.canvas_id(), "left");
        assert_eq!(custom.label_id(), "left-text");
    }

    #[test]
    fn builder_uses_drawing_defaults() {
        let config = GaugeConfig::builder()
            .id("x")
            .min(0.0)
            .max(1.0)
            .start_angle(0.0)
            .end_angle(90.0)
            .unit("u")
            .build();
        assert_eq!(config.tick_step, 10.0);
        assert_eq!(config.minor_tick_step, 50.0);
        assert_eq!(config.style.radius, 100.0);
        assert_eq!(config.style.needle_color, Color::RED);
    }

    #[test]
    fn framerate_cap_must_be_positive() {
        DashboardConfig::default().validate().unwrap();
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let config = DashboardConfig::builder().max_framerate(fps).build();
            assert!(matches!(
                config.validate(),
                Err(GaugeError::InvalidFramerate(_))
            ));
        }
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let mut config = GaugeConfig::humidity();
        config.max = config.min;
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        let mut config = GaugeConfig::co();
        config.minor_tick_step = 0.0;
        match config.validate() {
            Err(GaugeError::InvalidTickStep { kind, .. }) => assert_eq!(kind, "minor"),
            other => panic!("unexpected {other:?}"),
        }

        let mut config = GaugeConfig::co();
        config.tick_step = -5.0;
        match config.validate() {
            Err(GaugeError::InvalidTickStep { kind, .. }) => assert_eq!(kind, "major"),
            other => panic!("unexpected {other:?}"),
        }
    }
}

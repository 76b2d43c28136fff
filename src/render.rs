//! Gauge face rendering: maps a value onto the configured arc and paints the
//! background arc, graduations, needle, hub and textual readout.

use crate::config::GaugeConfig;
use crate::surface::{LabelSink, Point, Stroke, Surface};

/// A graduation on the arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Degrees, in the same frame as the gauge's start and end angles
    pub angle: f64,
}

// ============================================================================
// VALUE MAPPING
// ============================================================================

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Normalised position of `value` in the gauge range, clamped into `[0, 1]`
pub fn value_ratio(config: &GaugeConfig, value: f64) -> f64 {
    let clamped = value.max(config.min).min(config.max);
    (clamped - config.min) / (config.max - config.min)
}

fn ratio_to_angle(config: &GaugeConfig, ratio: f64) -> f64 {
    config.start_angle + ratio * (config.end_angle - config.start_angle)
}

/// Needle angle in degrees for `value`
pub fn needle_angle(config: &GaugeConfig, value: f64) -> f64 {
    ratio_to_angle(config, value_ratio(config, value))
}

/// Evenly spaced graduations over `[min, max]`.
///
/// The count comes from `ceil(span / step)`; positions are equal fractions of
/// the span, so the last interval is stretched rather than shortened.
fn graduations(config: &GaugeConfig, step: f64, inclusive: bool) -> Vec<Tick> {
    let span = config.max - config.min;
    let steps = (span / step).ceil() as usize;
    let count = if inclusive { steps + 1 } else { steps };
    (0..count)
        .map(|i| {
            let value = config.min + (i as f64 / steps as f64) * span;
            let ratio = (value - config.min) / span;
            Tick {
                value,
                angle: ratio_to_angle(config, ratio),
            }
        })
        .collect()
}

/// Labelled graduations, including both range boundaries
pub fn major_ticks(config: &GaugeConfig) -> Vec<Tick> {
    graduations(config, config.tick_step, true)
}

/// Unlabelled graduations; the final boundary is left to the major ticks
pub fn minor_ticks(config: &GaugeConfig) -> Vec<Tick> {
    graduations(config, config.minor_tick_step, false)
}

/// Readout text: the raw value rounded, a space, then the unit
pub fn format_label(value: f64, unit: &str) -> String {
    format!("{} {}", round_half_up(value), unit)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Fully repaints `surface` for `value` and overwrites `label` with the readout.
///
/// Expects a validated config; `min == max` divides by zero.
pub fn render_gauge<S, L>(surface: &mut S, label: &mut L, config: &GaugeConfig, value: f64)
where
    S: Surface + ?Sized,
    L: LabelSink + ?Sized,
{
    let style = &config.style;
    let (width, height) = surface.size();
    let center = Point::new(width / 2.0, height / 2.0);
    let radius = style.radius;
    let needle = needle_angle(config, value).to_radians();

    surface.clear();

    surface.stroke_arc(
        center,
        radius,
        config.start_angle.to_radians(),
        config.end_angle.to_radians(),
        Stroke::new(style.arc_width, style.arc_color),
    );

    for tick in major_ticks(config) {
        let angle = tick.angle.to_radians();
        surface.stroke_line(
            center.polar(angle, radius - style.major_tick_inner_offset),
            center.polar(angle, radius),
            Stroke::new(style.major_tick_width, style.major_tick_color),
        );
        surface.fill_text(
            center.polar(angle, radius - style.tick_label_offset),
            &round_half_up(tick.value).to_string(),
            style.tick_label_font_size,
            style.tick_label_color,
        );
    }

    for tick in minor_ticks(config) {
        let angle = tick.angle.to_radians();
        surface.stroke_line(
            center.polar(angle, radius - style.minor_tick_inner_offset),
            center.polar(angle, radius - style.minor_tick_outer_offset),
            Stroke::new(style.minor_tick_width, style.minor_tick_color),
        );
    }

    surface.stroke_line(
        center,
        center.polar(needle, radius - style.needle_offset),
        Stroke::new(style.needle_width, style.needle_color),
    );

    // Hub goes last so it covers the needle base
    surface.fill_circle(center, style.dot_radius, style.dot_color);

    label.set_text(&format_label(value, &config.unit));
}

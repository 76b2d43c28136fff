use rusttype::{point, Font, PositionedGlyph, Scale};
use std::f64::consts::TAU;
use std::path::Path;

use crate::config::Color;
use crate::error::{GaugeError, Result};
use crate::surface::{Point, Stroke, Surface};

/// Fonts tried when no font path is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path)?;
    Font::try_from_vec(data).ok_or_else(|| GaugeError::Font(path.display().to_string()))
}

/// First loadable font out of a few common system locations
pub fn find_system_font() -> Option<Font<'static>> {
    SYSTEM_FONTS
        .iter()
        .map(Path::new)
        .filter(|path| path.exists())
        .find_map(|path| load_font(path).ok())
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// Rectangle of the framebuffer a canvas draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel surface over an RGBA8 frame, clipped to one viewport
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    viewport: Viewport,
    background: Color,
    font: Option<&'a Font<'static>>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
            viewport: Viewport::new(0, 0, width, height),
            background: Color::new(0, 0, 0),
            font: None,
        }
    }

    /// Restricts drawing to `viewport`; coordinates become viewport-relative
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        let x = viewport.x.min(self.width);
        let y = viewport.y.min(self.height);
        self.viewport = Viewport::new(
            x,
            y,
            viewport.width.min(self.width - x),
            viewport.height.min(self.height - y),
        );
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_font(mut self, font: Option<&'a Font<'static>>) -> Self {
        self.font = font;
        self
    }

    /// Alpha-blends `color` onto the viewport-relative pixel `(x, y)`
    fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.viewport.width || y as usize >= self.viewport.height
        {
            return;
        }
        let px = self.viewport.x + x as usize;
        let py = self.viewport.y + y as usize;
        let idx = (py * self.width + px) * 4;
        if idx + 4 > self.frame.len() {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    fn draw_text(&mut self, font: &Font<'static>, anchor: Point, text: &str, size: f32, color: Color) {
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .collect();

        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let offset_x = anchor.x.round() as i32 - (max_x - min_x) / 2;
        let offset_y = anchor.y.round() as i32 - (max_y - min_y) / 2;

        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + gx as i32 + bb.min.x - min_x;
                    let py = offset_y + gy as i32 + bb.min.y - min_y;
                    self.set_pixel(px, py, color, v);
                });
            }
        }
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

/// Clockwise sweep from `start` to `end`, in `[0, TAU]`
fn clockwise_sweep(start: f64, end: f64) -> f64 {
    if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

impl Surface for Canvas<'_> {
    fn size(&self) -> (f64, f64) {
        (self.viewport.width as f64, self.viewport.height as f64)
    }

    fn clear(&mut self) {
        let rgba = [self.background.r, self.background.g, self.background.b, 0xff];
        for row in self.viewport.y..self.viewport.y + self.viewport.height {
            let start = (row * self.width + self.viewport.x) * 4;
            let end = start + self.viewport.width * 4;
            if end > self.frame.len() {
                break;
            }
            for chunk in self.frame[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    fn stroke_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, stroke: Stroke) {
        let half = stroke.width as f64 / 2.0;
        let reach = radius + half + 1.0;
        let sweep = clockwise_sweep(start, end);
        let min_x = (center.x - reach).floor() as i32;
        let max_x = (center.x + reach).ceil() as i32;
        let min_y = (center.y - reach).floor() as i32;
        let max_y = (center.y + reach).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - center.x;
                let dy = y as f64 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (half + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
                if aa <= 0.0 {
                    continue;
                }
                let offset = (dy.atan2(dx) - start).rem_euclid(TAU);
                if offset <= sweep {
                    self.set_pixel(x, y, stroke.color, aa as f32);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let thickness = stroke.width as f64;
        let pad = thickness.ceil() + 1.0;
        let min_x = (from.x.min(to.x) - pad).floor() as i32;
        let max_x = (from.x.max(to.x) + pad).ceil() as i32;
        let min_y = (from.y.min(to.y) - pad).floor() as i32;
        let max_y = (from.y.max(to.y) + pad).ceil() as i32;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 - from.x;
                let py = y as f64 - from.y;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = from.x + t * dx;
                let ly = from.y + t * dy;
                let dist = ((lx - x as f64).powi(2) + (ly - y as f64).powi(2)).sqrt();
                let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, stroke.color, aa as f32);
                }
            }
        }
    }

    fn fill_text(&mut self, anchor: Point, text: &str, font_size: f32, color: Color) {
        if let Some(font) = self.font {
            self.draw_text(font, anchor, text, font_size, color);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let reach = radius + 1.0;
        for y in (center.y - reach).floor() as i32..=(center.y + reach).ceil() as i32 {
            for x in (center.x - reach).floor() as i32..=(center.x + reach).ceil() as i32 {
                let dist = ((x as f64 - center.x).powi(2) + (y as f64 - center.y).powi(2)).sqrt();
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 40;
    const H: usize = 20;

    fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
        let idx = (y * W + x) * 4;
        [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
    }

    #[test]
    fn clear_only_touches_viewport() {
        let mut frame = vec![0u8; W * H * 4];
        let mut canvas = Canvas::new(&mut frame, W, H)
            .with_viewport(Viewport::new(20, 0, 20, 20))
            .with_background(Color::new(10, 20, 30));
        canvas.clear();
        assert_eq!(canvas.size(), (20.0, 20.0));

        assert_eq!(pixel(&frame, 19, 5), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 20, 5), [10, 20, 30, 0xff]);
        assert_eq!(pixel(&frame, 39, 19), [10, 20, 30, 0xff]);
    }

    #[test]
    fn viewport_is_clipped_to_frame() {
        let mut frame = vec![0u8; W * H * 4];
        let canvas = Canvas::new(&mut frame, W, H).with_viewport(Viewport::new(30, 10, 50, 50));
        assert_eq!(canvas.size(), (10.0, 10.0));
    }

    #[test]
    fn circle_is_drawn_relative_to_viewport() {
        let mut frame = vec![0u8; W * H * 4];
        let mut canvas = Canvas::new(&mut frame, W, H).with_viewport(Viewport::new(20, 0, 20, 20));
        canvas.fill_circle(Point::new(10.0, 10.0), 3.0, Color::WHITE);

        assert_eq!(pixel(&frame, 30, 10), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(pixel(&frame, 10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn line_covers_its_path() {
        let mut frame = vec![0u8; W * H * 4];
        let mut canvas = Canvas::new(&mut frame, W, H);
        canvas.stroke_line(
            Point::new(2.0, 10.0),
            Point::new(30.0, 10.0),
            Stroke::new(3.0, Color::RED),
        );
        assert_eq!(pixel(&frame, 15, 10), [0xff, 0, 0, 0xff]);
        assert_eq!(pixel(&frame, 15, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn arc_respects_clockwise_sweep() {
        let mut frame = vec![0u8; W * H * 4];
        let mut canvas = Canvas::new(&mut frame, W, H);
        // Upper half of a circle: -180° round to 0° through -90° (up)
        canvas.stroke_arc(
            Point::new(20.0, 10.0),
            8.0,
            -std::f64::consts::PI,
            0.0,
            Stroke::new(2.0, Color::WHITE),
        );
        assert_eq!(pixel(&frame, 20, 2), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(pixel(&frame, 20, 18), [0, 0, 0, 0]);
    }

    #[test]
    fn sweep_wraps_negative_spans() {
        assert!((clockwise_sweep(-std::f64::consts::PI, 0.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((clockwise_sweep(1.0, 0.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(clockwise_sweep(0.0, TAU), TAU);
    }

    #[test]
    fn text_ink_is_centred_on_anchor() {
        let Some(font) = find_system_font() else {
            return;
        };
        let (width, height) = (80, 40);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height).with_font(Some(&font));
        canvas.fill_text(Point::new(40.0, 20.0), "88", 20.0, Color::WHITE);

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (usize::MAX, 0, usize::MAX, 0);
        for y in 0..height {
            for x in 0..width {
                if frame[(y * width + x) * 4] > 0 {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        assert!(min_x <= max_x, "no ink drawn");
        let centre_x = (min_x + max_x) as f64 / 2.0;
        let centre_y = (min_y + max_y) as f64 / 2.0;
        assert!((centre_x - 40.0).abs() <= 2.0, "ink centred at x {centre_x}");
        assert!((centre_y - 20.0).abs() <= 2.0, "ink centred at y {centre_y}");
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut frame = vec![0u8; W * H * 4];
        let mut canvas = Canvas::new(&mut frame, W, H);
        canvas.fill_text(Point::new(10.0, 10.0), "100", 12.0, Color::WHITE);
        assert!(frame.iter().all(|&b| b == 0));
    }
}

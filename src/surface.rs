use crate::config::Color;

// ============================================================================
// DRAWING CAPABILITIES
// ============================================================================

/// Position on a drawing surface, y axis pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` along `angle` (radians)
    pub fn polar(self, angle: f64, distance: f64) -> Self {
        Self::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }
}

/// Line width and colour used for stroked paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// A 2D target a gauge can be painted on.
///
/// Arcs run clockwise from `start` to `end` (radians). Text is centred
/// horizontally and vertically on its anchor.
pub trait Surface {
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn stroke_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, stroke: Stroke);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn fill_text(&mut self, anchor: Point, text: &str, font_size: f32, color: Color);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}

/// Receives the textual readout of a gauge; each call replaces the whole text
pub trait LabelSink {
    fn set_text(&mut self, text: &str);
}

impl LabelSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        anchor: Point,
        text: String,
        font_size: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Recording surface: keeps the commands of the last repaint so they can be
/// replayed onto a pixel target later.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn render(&self, target: &mut impl Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear => target.clear(),
                DrawCommand::Arc {
                    center,
                    radius,
                    start,
                    end,
                    stroke,
                } => target.stroke_arc(*center, *radius, *start, *end, *stroke),
                DrawCommand::Line { from, to, stroke } => target.stroke_line(*from, *to, *stroke),
                DrawCommand::Text {
                    anchor,
                    text,
                    font_size,
                    color,
                } => target.fill_text(*anchor, text, *font_size, *color),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
            }
        }
    }
}

impl Surface for Scene {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Drops everything recorded so far; a repaint never layers on the last one
    fn clear(&mut self) {
        self.commands.clear();
        self.add_command(DrawCommand::Clear);
    }

    fn stroke_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, stroke: Stroke) {
        self.add_command(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
            stroke,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.add_command(DrawCommand::Line { from, to, stroke });
    }

    fn fill_text(&mut self, anchor: Point, text: &str, font_size: f32, color: Color) {
        self.add_command(DrawCommand::Text {
            anchor,
            text: text.to_string(),
            font_size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.add_command(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

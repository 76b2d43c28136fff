use std::collections::HashMap;

use crate::config::GaugeConfig;
use crate::error::{GaugeError, Result};
use crate::render::render_gauge;
use crate::surface::{LabelSink, Surface};

/// Something the animation layer can paint gauges onto
pub trait GaugeHost {
    /// Renders one frame of `config` at `value`
    fn draw(&mut self, config: &GaugeConfig, value: f64) -> Result<()>;
}

/// Drawing surfaces and label sinks addressed by identifier
#[derive(Debug, Clone)]
pub struct Board<S, L = String> {
    surfaces: HashMap<String, S>,
    labels: HashMap<String, L>,
}

impl<S, L> Default for Board<S, L> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
            labels: HashMap::new(),
        }
    }
}

impl<S: Surface, L: LabelSink> Board<S, L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// One fresh surface and an empty label per gauge, under the gauge's identifiers
    pub fn for_gauges<'a>(
        gauges: impl IntoIterator<Item = &'a GaugeConfig>,
        mut make_surface: impl FnMut(&GaugeConfig) -> S,
    ) -> Self
    where
        L: Default,
    {
        let mut board = Self::new();
        for config in gauges {
            board.add_surface(config.canvas_id(), make_surface(config));
            board.add_label(config.label_id(), L::default());
        }
        board
    }

    pub fn add_surface(&mut self, id: impl Into<String>, surface: S) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn add_label(&mut self, id: impl Into<String>, label: L) {
        self.labels.insert(id.into(), label);
    }

    pub fn surface(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn label(&self, id: &str) -> Option<&L> {
        self.labels.get(id)
    }
}

impl<S: Surface, L: LabelSink> GaugeHost for Board<S, L> {
    fn draw(&mut self, config: &GaugeConfig, value: f64) -> Result<()> {
        let canvas_id = config.canvas_id();
        let label_id = config.label_id();
        let surface = self
            .surfaces
            .get_mut(&canvas_id)
            .ok_or(GaugeError::MissingSurface(canvas_id))?;
        let label = self
            .labels
            .get_mut(&label_id)
            .ok_or(GaugeError::MissingLabel(label_id))?;
        render_gauge(surface, label, config, value);
        Ok(())
    }
}

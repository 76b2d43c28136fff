use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::animation::{AnimationController, SystemClock};
use crate::board::Board;
use crate::canvas::{find_system_font, load_font, Canvas, Viewport};
use crate::config::{DashboardConfig, GaugeConfig};
use crate::error::Result;
use crate::sensor::{update_gauges, SensorFeed};
use crate::surface::{Point, Scene, Surface};

/// Window showing a row of animated gauges fed by a sensor source
pub struct Dashboard<F> {
    config: DashboardConfig,
    controller: AnimationController<SystemClock>,
    board: Board<Scene>,
    feed: F,
    font: Option<Font<'static>>,
}

impl<F: SensorFeed> Dashboard<F> {
    pub fn new(config: DashboardConfig, gauges: Vec<GaugeConfig>, feed: F) -> Result<Self> {
        config.validate()?;
        let board = Board::for_gauges(&gauges, |_| {
            Scene::new(config.panel_width, config.panel_height)
        });
        let controller = AnimationController::with_gauges(SystemClock, gauges)?;

        let font = match &config.font_path {
            Some(path) => Some(load_font(path)?),
            None => find_system_font(),
        };
        if font.is_none() {
            warn!("no usable font found, tick labels and readouts will not be drawn");
        }

        Ok(Self {
            config,
            controller,
            board,
            feed,
            font,
        })
    }

    /// Temperature, humidity and CO gauges with default window settings
    pub fn with_defaults(feed: F) -> Result<Self> {
        Self::new(DashboardConfig::default(), GaugeConfig::defaults(), feed)
    }

    /// Framebuffer size in pixels
    pub fn frame_size(&self) -> (usize, usize) {
        (
            self.config.panel_width * self.controller.store().len().max(1),
            self.config.panel_height + self.config.label_height,
        )
    }

    /// Pulls a sample from the feed and starts the matching transitions
    fn refresh(&mut self) {
        let readings = self.feed.read();
        if let Err(err) =
            update_gauges(&mut self.controller, &readings, self.config.animation_duration)
        {
            warn!(error = %err, "failed to apply sensor readings");
        }
    }

    /// Composites every gauge scene and its label into `frame`
    fn paint(&self, frame: &mut [u8], width: usize, height: usize) {
        let background = self.config.background_color;
        let (panel_width, panel_height) = (self.config.panel_width, self.config.panel_height);
        let font = self.font.as_ref();

        Canvas::new(frame, width, height)
            .with_background(background)
            .clear();

        for (index, gauge) in self.controller.store().configs().enumerate() {
            let x = index * panel_width;

            if let Some(scene) = self.board.surface(&gauge.canvas_id()) {
                let mut canvas = Canvas::new(frame, width, height)
                    .with_viewport(Viewport::new(x, 0, panel_width, panel_height))
                    .with_background(background)
                    .with_font(font);
                scene.render(&mut canvas);
            }

            if let Some(text) = self.board.label(&gauge.label_id()) {
                let mut canvas = Canvas::new(frame, width, height)
                    .with_viewport(Viewport::new(
                        x,
                        panel_height,
                        panel_width,
                        self.config.label_height,
                    ))
                    .with_background(background)
                    .with_font(font);
                let (w, h) = canvas.size();
                canvas.fill_text(
                    Point::new(w / 2.0, h / 2.0),
                    text,
                    self.config.label_font_size,
                    self.config.label_color,
                );
            }
        }
    }

    /// Opens the window and runs the frame loop until it is closed
    pub fn show(mut self) -> Result<()> {
        let (width, height) = self.frame_size();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?;
        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(width as u32, height as u32, surface_texture)?;

        self.controller.redraw(&mut self.board)?;
        info!(width, height, gauges = self.controller.store().len(), "dashboard started");

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();
        let mut next_update = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            error!(error = %err, "failed to resize surface");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        if now >= next_update {
                            self.refresh();
                            next_update = now + self.config.update_interval;
                        }
                        self.controller.tick(&mut self.board);
                        self.paint(pixels.frame_mut(), width, height);
                        if let Err(err) = pixels.render() {
                            error!(error = %err, "failed to present frame");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

use rand::Rng;
use std::time::Duration;
use tracing::debug;

use crate::animation::{AnimationController, Clock};
use crate::config::GaugeId;
use crate::error::{GaugeError, Result};

/// One sample of every sensor the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReadings {
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// ppm
    pub co: f64,
}

impl SensorReadings {
    /// Readings paired with the gauge that displays them
    pub fn targets(&self) -> [(GaugeId, f64); 3] {
        [
            (GaugeId::from("temp"), self.temperature),
            (GaugeId::from("humi"), self.humidity),
            (GaugeId::from("co"), self.co),
        ]
    }
}

/// Pull-model sensor source, sampled once per update interval
pub trait SensorFeed {
    fn read(&mut self) -> SensorReadings;
}

/// Uniform random integers standing in for real hardware
#[derive(Debug)]
pub struct RandomSensorFeed<R> {
    rng: R,
}

impl RandomSensorFeed<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSensorFeed<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSensorFeed<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SensorFeed for RandomSensorFeed<R> {
    fn read(&mut self) -> SensorReadings {
        SensorReadings {
            temperature: self.rng.random_range(-10..=100) as f64,
            humidity: self.rng.random_range(0..=100) as f64,
            co: self.rng.random_range(0..=1600) as f64,
        }
    }
}

/// Starts a transition on each gauge towards its new reading.
///
/// Either every gauge is updated or, if one is not registered, none is.
pub fn update_gauges<C: Clock>(
    controller: &mut AnimationController<C>,
    readings: &SensorReadings,
    duration: Duration,
) -> Result<()> {
    debug!(?readings, "new sensor readings");
    let targets = readings.targets();
    if let Some((id, _)) = targets.iter().find(|(id, _)| !controller.contains(id)) {
        return Err(GaugeError::UnknownGauge(id.clone()));
    }
    for (id, value) in targets {
        controller.animate(&id, value, duration)?;
    }
    Ok(())
}

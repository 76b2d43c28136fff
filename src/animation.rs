//! Time-based needle animation.
//!
//! [`AnimationController::animate`] starts a linear transition from the value a
//! gauge currently shows to a new target. The host calls
//! [`AnimationController::tick`] once per frame; each call samples the clock,
//! renders every gauge that is in flight and commits the target once a
//! transition reaches its end. Nothing blocks: a frame is a run-to-completion
//! step and the only suspension point is between ticks.

use std::cell::Cell;
use std::fmt::Debug;
use std::ops::Sub;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::GaugeHost;
use crate::config::{GaugeConfig, GaugeId};
use crate::error::{GaugeError, Result};

/// Transition length used when the caller does not pick one
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

// ============================================================================
// CLOCKS
// ============================================================================

/// Source of the current time for frame sampling
pub trait Clock {
    type Instant: Copy + Debug + Ord + Sub<Self::Instant, Output = Duration>;

    fn now(&self) -> Self::Instant;
}

/// Wall clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Self::Instant {
        self.now.get()
    }
}

// ============================================================================
// GAUGE STATE
// ============================================================================

/// Committed value of a gauge. Starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GaugeState {
    pub value: f64,
}

#[derive(Debug, Clone)]
struct AnimationTask<I> {
    from: f64,
    target: f64,
    started: I,
    duration: Duration,
    /// Value painted by the most recent frame
    current: f64,
}

impl<I: Copy + Sub<I, Output = Duration>> AnimationTask<I> {
    fn progress(&self, now: I) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now - self.started;
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn value_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            self.target
        } else {
            self.from + (self.target - self.from) * progress
        }
    }
}

#[derive(Debug, Clone)]
struct GaugeSlot<I> {
    config: GaugeConfig,
    state: GaugeState,
    active: Option<AnimationTask<I>>,
}

impl<I> GaugeSlot<I> {
    /// Value a frame would show right now
    fn displayed(&self) -> f64 {
        self.active
            .as_ref()
            .map_or(self.state.value, |task| task.current)
    }
}

/// Gauges by identifier, in registration order
#[derive(Debug, Clone)]
pub struct GaugeStore<I> {
    slots: Vec<GaugeSlot<I>>,
}

impl<I> Default for GaugeStore<I> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<I> GaugeStore<I> {
    pub fn insert(&mut self, config: GaugeConfig) -> Result<()> {
        config.validate()?;
        if self.slots.iter().any(|slot| slot.config.id == config.id) {
            return Err(GaugeError::DuplicateGauge(config.id));
        }
        self.slots.push(GaugeSlot {
            config,
            state: GaugeState::default(),
            active: None,
        });
        Ok(())
    }

    pub fn state(&self, id: &GaugeId) -> Option<&GaugeState> {
        self.slot(id).map(|slot| &slot.state)
    }

    pub fn config(&self, id: &GaugeId) -> Option<&GaugeConfig> {
        self.slot(id).map(|slot| &slot.config)
    }

    pub fn configs(&self) -> impl Iterator<Item = &GaugeConfig> {
        self.slots.iter().map(|slot| &slot.config)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: &GaugeId) -> Option<&GaugeSlot<I>> {
        self.slots.iter().find(|slot| &slot.config.id == id)
    }

    fn slot_mut(&mut self, id: &GaugeId) -> Result<&mut GaugeSlot<I>> {
        self.slots
            .iter_mut()
            .find(|slot| &slot.config.id == id)
            .ok_or_else(|| GaugeError::UnknownGauge(id.clone()))
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Drives gauge transitions frame by frame against an injected clock
#[derive(Debug)]
pub struct AnimationController<C: Clock> {
    clock: C,
    store: GaugeStore<C::Instant>,
}

impl<C: Clock> AnimationController<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            store: GaugeStore::default(),
        }
    }

    pub fn with_gauges(clock: C, gauges: impl IntoIterator<Item = GaugeConfig>) -> Result<Self> {
        let mut controller = Self::new(clock);
        for config in gauges {
            controller.register(config)?;
        }
        Ok(controller)
    }

    pub fn register(&mut self, config: GaugeConfig) -> Result<()> {
        self.store.insert(config)
    }

    pub fn store(&self) -> &GaugeStore<C::Instant> {
        &self.store
    }

    /// Committed value of `id`
    pub fn value(&self, id: &GaugeId) -> Option<f64> {
        self.store.state(id).map(|state| state.value)
    }

    pub fn contains(&self, id: &GaugeId) -> bool {
        self.store.slot(id).is_some()
    }

    pub fn is_animating(&self, id: &GaugeId) -> bool {
        self.store.slot(id).is_some_and(|slot| slot.active.is_some())
    }

    /// Starts moving `id` towards `target` over `duration`.
    ///
    /// A transition already in flight for the gauge is dropped and the new one
    /// starts from whatever that transition last painted. The committed value
    /// only changes when a transition completes.
    pub fn animate(&mut self, id: &GaugeId, target: f64, duration: Duration) -> Result<()> {
        let started = self.clock.now();
        let slot = self.store.slot_mut(id)?;
        let from = match slot.active.take() {
            Some(previous) => {
                debug!(gauge = %id, from = previous.current, to = previous.target, "cancelling transition");
                previous.current
            }
            None => slot.state.value,
        };
        debug!(gauge = %id, from, target, ?duration, "starting transition");
        slot.active = Some(AnimationTask {
            from,
            target,
            started,
            duration,
            current: from,
        });
        Ok(())
    }

    /// Renders one frame of every gauge in flight and returns how many are
    /// still running afterwards.
    ///
    /// A frame the host cannot paint is logged and skipped; the transition
    /// still advances and commits on schedule.
    pub fn tick(&mut self, host: &mut impl GaugeHost) -> usize {
        let now = self.clock.now();
        let mut running = 0;
        for slot in &mut self.store.slots {
            let Some(task) = slot.active.as_mut() else {
                continue;
            };
            let progress = task.progress(now);
            let value = task.value_at(progress);
            task.current = value;
            let target = task.target;

            if let Err(err) = host.draw(&slot.config, value) {
                warn!(gauge = %slot.config.id, error = %err, "frame skipped");
            }

            if progress < 1.0 {
                running += 1;
            } else {
                slot.state.value = target;
                slot.active = None;
                debug!(gauge = %slot.config.id, value = target, "transition committed");
            }
        }
        running
    }

    /// Paints every gauge at the value it currently shows
    pub fn redraw(&self, host: &mut impl GaugeHost) -> Result<()> {
        for slot in &self.store.slots {
            host.draw(&slot.config, slot.displayed())?;
        }
        Ok(())
    }
}

//! Bounded random-walk sensor simulator.
//!
//! Pure logic: [`Simulator::step`] maps (previous reading, random source)
//! to a new reading and never touches session state. Randomness is
//! abstracted behind [`RandomSource`] so tests can run with
//! [`ZeroDelta`].

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::reading::{SensorKind, SensorReading, Slot};

// ---------------------------------------------------------------------------
// Random sources
// ---------------------------------------------------------------------------

/// Source of the per-tick randomness consumed by the simulator.
pub trait RandomSource {
    /// Uniform value in `[-magnitude, magnitude]`.
    fn delta(&mut self, magnitude: f64) -> f64;
    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
    /// Fair coin flip.
    fn coin(&mut self) -> bool;
}

/// [`RandomSource`] backed by any [`rand::Rng`].
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::StdRng> {
    /// Seed a `StdRng` from the operating system. `Send`, unlike
    /// `ThreadRng`, so it can live inside a spawned task.
    pub fn from_os() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn delta(&mut self, magnitude: f64) -> f64 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        self.0.random_range(-magnitude..=magnitude)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.random_bool(p.clamp(0.0, 1.0))
    }

    fn coin(&mut self) -> bool {
        self.0.random()
    }
}

/// Deterministic source: every delta is zero and no chance ever fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroDelta;

impl RandomSource for ZeroDelta {
    fn delta(&mut self, _magnitude: f64) -> f64 {
        0.0
    }

    fn chance(&mut self, _p: f64) -> bool {
        false
    }

    fn coin(&mut self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Growth stage
// ---------------------------------------------------------------------------

/// Plant development stage, advanced cyclically by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Maturity,
}

impl GrowthStage {
    pub fn next(self) -> Self {
        match self {
            GrowthStage::Seedling => GrowthStage::Vegetative,
            GrowthStage::Vegetative => GrowthStage::Flowering,
            GrowthStage::Flowering => GrowthStage::Maturity,
            GrowthStage::Maturity => GrowthStage::Seedling,
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Maturity => "Maturity",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Advances readings by a bounded random walk.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Produce the next reading.
    ///
    /// Every configured field moves by a uniform delta up to its step size and
    /// is clamped to its bounds. Optional fields move only when present.
    /// The wind direction shifts one compass point (either way) with the
    /// configured probability.
    pub fn step(&self, previous: &SensorReading, rng: &mut dyn RandomSource) -> SensorReading {
        let mut next = previous.clone();

        for kind in SensorKind::ALL {
            let Some(spec) = self.config.field(kind) else {
                continue;
            };
            match next.slot_mut(kind) {
                Slot::Required(value) => {
                    *value = spec.clamp(*value + rng.delta(spec.delta));
                }
                Slot::Optional(Some(value)) => {
                    *value = spec.clamp(*value + rng.delta(spec.delta));
                }
                Slot::Optional(None) => {}
            }
        }

        if rng.chance(self.config.wind_shift_probability) {
            let delta = if rng.coin() { 1 } else { -1 };
            next.wind_direction = next.wind_direction.step(delta);
        }

        next
    }

    /// Advance the growth stage with the configured probability.
    pub fn advance_stage(&self, stage: GrowthStage, rng: &mut dyn RandomSource) -> GrowthStage {
        if rng.chance(self.config.stage_advance_probability) {
            stage.next()
        } else {
            stage
        }
    }

    /// Walk `count` steps from `base`, returning every intermediate reading
    /// oldest-first. Used to seed a history window.
    pub fn walk(
        &self,
        base: &SensorReading,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<SensorReading> {
        let mut current = base.clone();
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            current = self.step(&current, rng);
            out.push(current.clone());
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Per-crop dashboard state and the synchronous halves of a tick.
//!
//! A tick is split around the only suspending step, the advisor call:
//!
//! 1. [`DashboardSession::begin_tick`] simulates, stores the new reading,
//!    evaluates thresholds and returns a [`TickPlan`].
//! 2. The caller resolves the plan (locally or via the advisor).
//! 3. [`DashboardSession::complete_tick`] appends history and the alert.
//!
//! Every plan carries the session generation it was started under.
//! [`DashboardSession::reset`] bumps the generation, so a result that
//! resolves after a reset is discarded instead of applied.

use chrono::Utc;
use serde::Serialize;

use crate::advisory::{Advisory, AdvisoryRequest};
use crate::alert::{AlertEntry, AlertLog};
use crate::crop::CropProfile;
use crate::history::{HistoryBuffer, HistoryEntry};
use crate::reading::SensorReading;
use crate::simulation::{GrowthStage, RandomSource, Simulator};
use crate::thresholds::{self, ThresholdMap, Violation};

/// Initial state for a session; kept so the session can be reset.
#[derive(Debug, Clone)]
pub struct SessionSeed {
    pub profile: CropProfile,
    pub reading: SensorReading,
    pub stage: GrowthStage,
    pub thresholds: ThresholdMap,
    /// Oldest first.
    pub history: Vec<HistoryEntry>,
    /// Newest first.
    pub alerts: Vec<AlertEntry>,
}

/// Proof that a tick was started under a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTicket {
    generation: u64,
}

impl TickTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What must happen to finish a tick.
#[derive(Debug, Clone)]
pub enum TickPlan {
    /// A threshold fired; the advisory was synthesized locally.
    Local {
        ticket: TickTicket,
        advisory: Advisory,
        violations: Vec<Violation>,
    },
    /// No threshold fired; the advisor must be consulted.
    Delegate {
        ticket: TickTicket,
        request: AdvisoryRequest,
    },
}

/// Result of a completed tick, broadcast to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickUpdate {
    pub crop_id: String,
    pub generation: u64,
    pub growth_stage: GrowthStage,
    pub entry: HistoryEntry,
    pub alert: AlertEntry,
}

/// All live state for one displayed crop.
#[derive(Debug)]
pub struct DashboardSession {
    seed: SessionSeed,
    reading: SensorReading,
    stage: GrowthStage,
    thresholds: ThresholdMap,
    history: HistoryBuffer,
    alerts: AlertLog,
    field_image: Option<String>,
    generation: u64,
    in_flight: bool,
}

impl DashboardSession {
    pub fn new(seed: SessionSeed, history_capacity: usize, alert_capacity: usize) -> Self {
        let history = HistoryBuffer::from_entries(history_capacity, seed.history.iter().cloned());
        let mut alerts = AlertLog::with_capacity(alert_capacity);
        // Seed alerts are newest-first; prepend oldest first to keep order.
        for entry in seed.alerts.iter().rev() {
            alerts.prepend(entry.clone());
        }

        Self {
            reading: seed.reading.clone(),
            stage: seed.stage,
            thresholds: seed.thresholds.clone(),
            history,
            alerts,
            field_image: None,
            generation: 0,
            in_flight: false,
            seed,
        }
    }

    // ---- accessors ----

    pub fn profile(&self) -> &CropProfile {
        &self.seed.profile
    }

    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    pub fn thresholds(&self) -> &ThresholdMap {
        &self.thresholds
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn field_image(&self) -> Option<&str> {
        self.field_image.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_tick_in_flight(&self) -> bool {
        self.in_flight
    }

    // ---- mutation ----

    pub fn set_thresholds(&mut self, thresholds: ThresholdMap) {
        self.thresholds = thresholds;
    }

    pub fn set_field_image(&mut self, url: String) {
        self.field_image = Some(url);
    }

    /// Start a tick. Returns `None` while a previous tick is unresolved.
    pub fn begin_tick(
        &mut self,
        simulator: &Simulator,
        rng: &mut dyn RandomSource,
    ) -> Option<TickPlan> {
        if self.in_flight {
            tracing::debug!(
                crop_id = %self.seed.profile.id,
                "Previous tick still in flight, skipping"
            );
            return None;
        }

        self.reading = simulator.step(&self.reading, rng);
        self.stage = simulator.advance_stage(self.stage, rng);
        self.in_flight = true;

        let ticket = TickTicket {
            generation: self.generation,
        };
        let violations = thresholds::evaluate(&self.reading, &self.thresholds);

        Some(match thresholds::local_assessment(&violations) {
            Some(advisory) => TickPlan::Local {
                ticket,
                advisory,
                violations,
            },
            None => TickPlan::Delegate {
                ticket,
                request: self.advisory_request(),
            },
        })
    }

    /// Finish a tick. Returns `None` and leaves state untouched when the
    /// ticket belongs to an earlier generation.
    pub fn complete_tick(&mut self, ticket: TickTicket, advisory: Advisory) -> Option<TickUpdate> {
        if ticket.generation != self.generation {
            tracing::debug!(
                crop_id = %self.seed.profile.id,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding stale tick result"
            );
            return None;
        }

        let entry = HistoryEntry::now(self.reading.clone());
        let alert = AlertEntry {
            timestamp: Utc::now(),
            message: advisory.message,
            severity: advisory.severity,
        };
        self.history.push(entry.clone());
        self.alerts.prepend(alert.clone());
        self.in_flight = false;

        Some(TickUpdate {
            crop_id: self.seed.profile.id.clone(),
            generation: self.generation,
            growth_stage: self.stage,
            entry,
            alert,
        })
    }

    /// Restore seed state and invalidate any in-flight tick.
    pub fn reset(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = false;
        self.reading = self.seed.reading.clone();
        self.stage = self.seed.stage;
        self.thresholds = self.seed.thresholds.clone();
        self.history =
            HistoryBuffer::from_entries(self.history.capacity(), self.seed.history.iter().cloned());
        let mut alerts = AlertLog::with_capacity(self.alerts.capacity());
        for entry in self.seed.alerts.iter().rev() {
            alerts.prepend(entry.clone());
        }
        self.alerts = alerts;
        self.generation
    }

    /// The request sent to the advisor for the current reading.
    pub fn advisory_request(&self) -> AdvisoryRequest {
        AdvisoryRequest {
            crop_type: self.seed.profile.kind.to_string(),
            field_name: self.seed.profile.field_name.clone(),
            growth_stage: Some(self.stage),
            sensor_values: self.reading.sensor_values(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::alert::Severity;
    use crate::crop::{CropKind, Location};
    use crate::reading::{CompassDirection, SensorKind};
    use crate::simulation::ZeroDelta;
    use crate::thresholds::Threshold;

    fn seed(air_temperature: f64, thresholds: ThresholdMap) -> SessionSeed {
        SessionSeed {
            profile: CropProfile {
                id: "soy-1".into(),
                property_id: "prop-1".into(),
                kind: CropKind::Soy,
                field_name: "Campo Norte 7".into(),
                location: Location {
                    lat: -22.846146,
                    lng: -42.571864,
                },
            },
            reading: SensorReading {
                air_temperature,
                air_humidity: 70.0,
                wind_speed: 10.0,
                wind_direction: CompassDirection::NE,
                co2_concentration: 400.0,
                soil_moisture: 60.0,
                nitrogen: 150.0,
                soil_temperature: None,
                soil_ph: None,
                potassium: None,
                phosphorus: None,
                electrical_conductivity: None,
            },
            stage: GrowthStage::Vegetative,
            thresholds,
            history: Vec::new(),
            alerts: vec![AlertEntry {
                timestamp: Utc::now(),
                message: "seeded".into(),
                severity: Severity::Normal,
            }],
        }
    }

    fn hot_seed() -> SessionSeed {
        seed(
            36.0,
            ThresholdMap::from([(SensorKind::AirTemperature, Threshold::max(30.0))]),
        )
    }

    #[test]
    fn violation_plans_local_advisory() {
        let mut session = DashboardSession::new(hot_seed(), 30, 20);
        let plan = session
            .begin_tick(&Simulator::default(), &mut ZeroDelta)
            .expect("no tick in flight");

        assert_matches!(plan, TickPlan::Local { ref advisory, ref violations, .. } => {
            assert_eq!(advisory.message, "air temperature 36°C exceeds max 30°C");
            assert_eq!(advisory.severity, Severity::Attention);
            assert_eq!(violations.len(), 1);
        });
    }

    #[test]
    fn clean_reading_plans_delegation() {
        let mut session = DashboardSession::new(seed(25.0, ThresholdMap::new()), 30, 20);
        let plan = session
            .begin_tick(&Simulator::default(), &mut ZeroDelta)
            .unwrap();
        assert_matches!(plan, TickPlan::Delegate { request, .. } => {
            assert_eq!(request.crop_type, "Soy");
            assert_eq!(request.field_name, "Campo Norte 7");
            assert_eq!(request.growth_stage, Some(GrowthStage::Vegetative));
        });
    }

    #[test]
    fn overlapping_tick_is_ignored() {
        let mut session = DashboardSession::new(hot_seed(), 30, 20);
        let simulator = Simulator::default();
        assert!(session.begin_tick(&simulator, &mut ZeroDelta).is_some());
        assert!(session.is_tick_in_flight());
        assert!(session.begin_tick(&simulator, &mut ZeroDelta).is_none());
    }

    #[test]
    fn completion_appends_history_and_alert() {
        let mut session = DashboardSession::new(hot_seed(), 30, 20);
        let plan = session
            .begin_tick(&Simulator::default(), &mut ZeroDelta)
            .unwrap();
        let TickPlan::Local {
            ticket, advisory, ..
        } = plan
        else {
            panic!("expected local plan");
        };

        let update = session.complete_tick(ticket, advisory).expect("current ticket");

        assert_eq!(update.crop_id, "soy-1");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.alerts().len(), 2);
        assert_eq!(
            session.alerts().latest().unwrap().message,
            "air temperature 36°C exceeds max 30°C"
        );
        assert!(!session.is_tick_in_flight());
    }

    #[test]
    fn stale_result_after_reset_is_discarded() {
        let mut session = DashboardSession::new(hot_seed(), 30, 20);
        let plan = session
            .begin_tick(&Simulator::default(), &mut ZeroDelta)
            .unwrap();
        let ticket = match plan {
            TickPlan::Local { ticket, .. } | TickPlan::Delegate { ticket, .. } => ticket,
        };

        assert_eq!(session.reset(), 1);
        let applied = session.complete_tick(ticket, Advisory::fallback());

        assert!(applied.is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.alerts().len(), 1);
        assert_eq!(session.alerts().latest().unwrap().message, "seeded");
        assert!(!session.is_tick_in_flight());
    }

    #[test]
    fn reset_restores_seed_reading_and_thresholds() {
        let mut session = DashboardSession::new(hot_seed(), 30, 20);
        session.set_thresholds(ThresholdMap::new());
        let _ = session.begin_tick(&Simulator::default(), &mut ZeroDelta);
        session.reset();
        assert_eq!(session.reading().air_temperature, 36.0);
        assert_eq!(session.thresholds().len(), 1);
        assert_eq!(session.generation(), 1);
    }
}

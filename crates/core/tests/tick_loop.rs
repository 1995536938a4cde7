//! End-to-end tick scenarios against a stub advisor.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use campo_core::advisory::{Advisory, AdvisoryError, AdvisoryRequest, AlertAdvisor};
use campo_core::alert::Severity;
use campo_core::crop::{CropKind, CropProfile, Location};
use campo_core::history::HistoryEntry;
use campo_core::monitor::CropMonitor;
use campo_core::reading::{CompassDirection, SensorKind, SensorReading};
use campo_core::session::{DashboardSession, SessionSeed};
use campo_core::simulation::{GrowthStage, Simulator, ZeroDelta};
use campo_core::thresholds::{Threshold, ThresholdMap};

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Returns a fixed advisory and counts calls.
struct CountingAdvisor {
    calls: AtomicUsize,
    answer: Result<Advisory, ()>,
}

impl CountingAdvisor {
    fn answering(message: &str, severity: Severity) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Ok(Advisory {
                message: message.into(),
                severity,
            }),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Err(()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertAdvisor for CountingAdvisor {
    async fn assess(&self, _request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(|_| AdvisoryError::Malformed("missing field `message`".into()))
    }
}

/// Blocks until released, then answers.
struct GatedAdvisor {
    release: Notify,
}

#[async_trait]
impl AlertAdvisor for GatedAdvisor {
    async fn assess(&self, _request: &AdvisoryRequest) -> Result<Advisory, AdvisoryError> {
        self.release.notified().await;
        Ok(Advisory {
            message: "late answer".into(),
            severity: Severity::Normal,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn reading(air_temperature: f64) -> SensorReading {
    SensorReading {
        air_temperature,
        air_humidity: 70.0,
        wind_speed: 10.0,
        wind_direction: CompassDirection::N,
        co2_concentration: 400.0,
        soil_moisture: 60.0,
        nitrogen: 150.0,
        soil_temperature: None,
        soil_ph: None,
        potassium: None,
        phosphorus: None,
        electrical_conductivity: None,
    }
}

fn session(air_temperature: f64, thresholds: ThresholdMap, history: Vec<HistoryEntry>) -> DashboardSession {
    let seed = SessionSeed {
        profile: CropProfile {
            id: "corn-1".into(),
            property_id: "prop-1".into(),
            kind: CropKind::Corn,
            field_name: "Lote Leste Cume".into(),
            location: Location {
                lat: -22.85,
                lng: -42.565,
            },
        },
        reading: reading(air_temperature),
        stage: GrowthStage::Flowering,
        thresholds,
        history,
        alerts: Vec::new(),
    };
    DashboardSession::new(seed, 30, 20)
}

fn monitor_for(session: DashboardSession, advisor: Arc<dyn AlertAdvisor>) -> CropMonitor {
    CropMonitor::new(
        session,
        Arc::new(Simulator::default()),
        Box::new(ZeroDelta),
        advisor,
        Duration::from_secs(1),
    )
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn violation_is_reported_locally_without_calling_advisor() {
    let advisor = CountingAdvisor::answering("unused", Severity::Normal);
    let thresholds = ThresholdMap::from([(SensorKind::AirTemperature, Threshold::max(30.0))]);
    let monitor = monitor_for(session(36.0, thresholds, Vec::new()), advisor.clone());

    let update = monitor.tick().await.expect("tick applied");

    assert_eq!(advisor.calls(), 0);
    assert_eq!(update.alert.severity, Severity::Attention);
    assert!(update.alert.message.contains("air temperature"));

    let session = monitor.session().read().await;
    let latest = session.alerts().latest().unwrap();
    assert_eq!(latest.message, "air temperature 36°C exceeds max 30°C");
    assert_eq!(latest.severity, Severity::Attention);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn clean_reading_takes_advisor_answer() {
    let advisor = CountingAdvisor::answering("All good", Severity::Normal);
    let monitor = monitor_for(session(25.0, ThresholdMap::new(), Vec::new()), advisor.clone());

    monitor.tick().await.expect("tick applied");

    assert_eq!(advisor.calls(), 1);
    let session = monitor.session().read().await;
    let latest = session.alerts().latest().unwrap();
    assert_eq!(latest.message, "All good");
    assert_eq!(latest.severity, Severity::Normal);
}

#[tokio::test]
async fn advisor_failure_records_fallback() {
    let advisor = CountingAdvisor::failing();
    let monitor = monitor_for(session(25.0, ThresholdMap::new(), Vec::new()), advisor);

    let update = monitor.tick().await.expect("tick applied");

    assert_eq!(update.alert.message, "AI recommendation unavailable");
    assert_eq!(update.alert.severity, Severity::Attention);
}

#[tokio::test]
async fn full_history_rolls_over() {
    let history: Vec<_> = (1..=30)
        .map(|i| HistoryEntry {
            time: i.to_string(),
            recorded_at: Utc::now(),
            reading: reading(25.0),
        })
        .collect();
    let advisor = CountingAdvisor::answering("All good", Severity::Normal);
    let monitor = monitor_for(session(25.0, ThresholdMap::new(), history), advisor);

    monitor.tick().await.expect("tick applied");

    let session = monitor.session().read().await;
    assert_eq!(session.history().len(), 30);
    assert_eq!(session.history().iter().next().unwrap().time, "2");
}

#[tokio::test]
async fn reset_during_advisor_call_discards_result() {
    let advisor = Arc::new(GatedAdvisor {
        release: Notify::new(),
    });
    let monitor = Arc::new(monitor_for(
        session(25.0, ThresholdMap::new(), Vec::new()),
        advisor.clone(),
    ));

    let ticking = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move { monitor.tick().await }
    });

    // Wait until the tick is parked in the advisor call.
    while !monitor.session().read().await.is_tick_in_flight() {
        tokio::task::yield_now().await;
    }
    // A second tick is refused while the first is unresolved.
    assert!(monitor.tick().await.is_none());

    assert_eq!(monitor.reset().await, 1);
    advisor.release.notify_one();

    let applied = ticking.await.expect("tick task");
    assert!(applied.is_none());

    let session = monitor.session().read().await;
    assert!(session.history().is_empty());
    assert!(session.alerts().is_empty());
}

#[tokio::test]
async fn sensor_values_reach_advisor_request() {
    let session = session(25.0, ThresholdMap::new(), Vec::new());
    let request = session.advisory_request();
    let expected: BTreeMap<_, _> = session.reading().sensor_values();
    assert_eq!(request.sensor_values, expected);
    assert_eq!(request.crop_type, "Corn");
}

//! Static seed data for the demo dashboard.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::alert::{AlertEntry, Severity};
use crate::crop::{CropKind, CropProfile, Location};
use crate::history::HistoryEntry;
use crate::reading::{CompassDirection, SensorKind, SensorReading};
use crate::session::SessionSeed;
use crate::simulation::{GrowthStage, RandomSource, Simulator};
use crate::thresholds::{Threshold, ThresholdMap};

/// A farm property and the crops it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: String,
    pub name: String,
    pub municipality: String,
    /// Two-letter state code.
    pub state: String,
    pub crop_ids: Vec<String>,
}

pub fn properties() -> Vec<PropertySummary> {
    vec![
        PropertySummary {
            id: "prop-1".into(),
            name: "Fazenda Experimental".into(),
            municipality: "Campinas".into(),
            state: "SP".into(),
            crop_ids: vec!["soy-1".into(), "corn-1".into()],
        },
        PropertySummary {
            id: "prop-2".into(),
            name: "Sítio Belo Campo".into(),
            municipality: "Piracicaba".into(),
            state: "SP".into(),
            crop_ids: vec!["wheat-1".into()],
        },
    ]
}

/// Thresholds mirroring the seeded alert criteria.
pub fn default_thresholds() -> ThresholdMap {
    ThresholdMap::from([
        (SensorKind::AirTemperature, Threshold::max(35.0)),
        (SensorKind::SoilMoisture, Threshold::min(20.0)),
    ])
}

struct CropSeed {
    id: &'static str,
    property_id: &'static str,
    kind: CropKind,
    field_name: &'static str,
    location: Location,
    stage: GrowthStage,
    base: [f64; 6],
    wind: CompassDirection,
    /// (minutes ago, message, severity), newest first.
    alerts: [(i64, &'static str, Severity); 3],
}

fn crop_seeds() -> [CropSeed; 3] {
    [
        CropSeed {
            id: "soy-1",
            property_id: "prop-1",
            kind: CropKind::Soy,
            field_name: "Campo Norte 7",
            location: Location {
                lat: -22.846146,
                lng: -42.571864,
            },
            stage: GrowthStage::Vegetative,
            base: [25.1, 75.2, 10.5, 400.0, 65.0, 150.0],
            wind: CompassDirection::NE,
            alerts: [
                (
                    0,
                    "Ideal conditions for vegetative development. No action needed.",
                    Severity::Normal,
                ),
                (
                    90,
                    "Slight temperature increase, still within the safe range.",
                    Severity::Normal,
                ),
                (240, "Irrigation completed successfully.", Severity::Normal),
            ],
        },
        CropSeed {
            id: "corn-1",
            property_id: "prop-1",
            kind: CropKind::Corn,
            field_name: "Lote Leste Cume",
            location: Location {
                lat: -22.85,
                lng: -42.565,
            },
            stage: GrowthStage::Flowering,
            base: [26.8, 72.8, 12.3, 410.0, 60.0, 180.0],
            wind: CompassDirection::E,
            alerts: [
                (
                    0,
                    "Soil moisture slightly below ideal for flowering. Monitor irrigation.",
                    Severity::Attention,
                ),
                (
                    180,
                    "Wind speed increased, no immediate risk.",
                    Severity::Normal,
                ),
                (300, "Nitrogen levels stable.", Severity::Normal),
            ],
        },
        CropSeed {
            id: "wheat-1",
            property_id: "prop-2",
            kind: CropKind::Wheat,
            field_name: "Fundo do Vale",
            location: Location {
                lat: -22.84,
                lng: -42.58,
            },
            stage: GrowthStage::Vegetative,
            base: [22.4, 80.5, 8.1, 390.0, 70.0, 130.0],
            wind: CompassDirection::SW,
            alerts: [
                (
                    0,
                    "Fungal disease risk from high humidity and temperature. Preventive action recommended.",
                    Severity::Critical,
                ),
                (
                    120,
                    "Air humidity persistently high.",
                    Severity::Attention,
                ),
                (
                    240,
                    "Ideal conditions for vegetative development.",
                    Severity::Normal,
                ),
            ],
        },
    ]
}

/// Session seeds for every demo crop.
///
/// Each crop gets `history_len` daily history entries walked from its base
/// reading, oldest first, ending today.
pub fn crops(
    simulator: &Simulator,
    rng: &mut dyn RandomSource,
    history_len: usize,
) -> Vec<SessionSeed> {
    let now = Utc::now();

    crop_seeds()
        .into_iter()
        .map(|seed| {
            let [air_temperature, air_humidity, wind_speed, co2_concentration, soil_moisture, nitrogen] =
                seed.base;
            let reading = SensorReading {
                air_temperature,
                air_humidity,
                wind_speed,
                wind_direction: seed.wind,
                co2_concentration,
                soil_moisture,
                nitrogen,
                soil_temperature: None,
                soil_ph: None,
                potassium: None,
                phosphorus: None,
                electrical_conductivity: None,
            };

            let history = simulator
                .walk(&reading, history_len, rng)
                .into_iter()
                .enumerate()
                .map(|(i, reading)| {
                    let days_ago = (history_len - 1 - i) as i64;
                    let recorded_at = now - Duration::days(days_ago);
                    HistoryEntry {
                        time: recorded_at.format("%d/%m").to_string(),
                        recorded_at,
                        reading,
                    }
                })
                .collect();

            let alerts = seed
                .alerts
                .iter()
                .map(|(minutes_ago, message, severity)| AlertEntry {
                    timestamp: now - Duration::minutes(*minutes_ago),
                    message: (*message).to_string(),
                    severity: *severity,
                })
                .collect();

            SessionSeed {
                profile: CropProfile {
                    id: seed.id.into(),
                    property_id: seed.property_id.into(),
                    kind: seed.kind,
                    field_name: seed.field_name.into(),
                    location: seed.location,
                },
                reading,
                stage: seed.stage,
                thresholds: default_thresholds(),
                history,
                alerts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ZeroDelta;

    #[test]
    fn every_crop_belongs_to_a_listed_property() {
        let seeds = crops(&Simulator::default(), &mut ZeroDelta, 30);
        let props = properties();
        assert_eq!(seeds.len(), 3);
        for seed in &seeds {
            let owner = props
                .iter()
                .find(|p| p.id == seed.profile.property_id)
                .expect("owner property exists");
            assert!(owner.crop_ids.contains(&seed.profile.id));
        }
    }

    #[test]
    fn history_is_daily_and_ends_today() {
        let seeds = crops(&Simulator::default(), &mut ZeroDelta, 30);
        let soy = &seeds[0];
        assert_eq!(soy.history.len(), 30);
        assert_eq!(
            soy.history.last().unwrap().time,
            Utc::now().format("%d/%m").to_string()
        );
        assert!(soy.history[0].recorded_at < soy.history[29].recorded_at);
        // Zero delta keeps the walk on the base reading.
        assert_eq!(soy.history[0].reading.air_temperature, 25.1);
    }

    #[test]
    fn alerts_are_newest_first() {
        let seeds = crops(&Simulator::default(), &mut ZeroDelta, 30);
        let wheat = &seeds[2];
        assert_eq!(wheat.alerts[0].severity, Severity::Critical);
        assert!(wheat.alerts[0].timestamp > wheat.alerts[2].timestamp);
    }

    #[test]
    fn seed_readings_sit_inside_default_thresholds() {
        let thresholds = default_thresholds();
        for seed in crops(&Simulator::default(), &mut ZeroDelta, 0) {
            assert!(crate::thresholds::evaluate(&seed.reading, &thresholds).is_empty());
        }
    }
}

//! Threshold evaluation for sensor readings.
//!
//! Pure logic, no I/O. A violated threshold short-circuits the call to the
//! generation service: the caller turns the violations into a local
//! advisory via [`local_assessment`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::advisory::Advisory;
use crate::alert::Severity;
use crate::reading::{SensorKind, SensorReading};

/// Acceptable range for one sensor. A missing bound is unconstrained on
/// that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Threshold {
    pub fn min(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn max(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// The bound `value` violates, if any. Comparisons are strict, so a
    /// value sitting exactly on a bound passes.
    pub fn violated_bound(&self, value: f64) -> Option<Bound> {
        if let Some(min) = self.min {
            if value < min {
                return Some(Bound::Min(min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(Bound::Max(max));
            }
        }
        None
    }
}

/// Thresholds keyed by sensor. Sensors without an entry are unconstrained.
pub type ThresholdMap = BTreeMap<SensorKind, Threshold>;

/// Which side of a threshold was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "side", content = "limit", rename_all = "lowercase")]
pub enum Bound {
    Min(f64),
    Max(f64),
}

/// A single sensor outside its configured range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub sensor: SensorKind,
    pub value: f64,
    pub bound: Bound,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.sensor.unit();
        let value = one_decimal(self.value);
        match self.bound {
            Bound::Max(max) => write!(
                f,
                "{} {value}{unit} exceeds max {}{unit}",
                self.sensor.label(),
                one_decimal(max)
            ),
            Bound::Min(min) => write!(
                f,
                "{} {value}{unit} below min {}{unit}",
                self.sensor.label(),
                one_decimal(min)
            ),
        }
    }
}

/// Round to one decimal; `Display` for `f64` then drops a trailing `.0`.
fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Collect every violated threshold. All sensors are checked; one
/// violation never hides another.
pub fn evaluate(reading: &SensorReading, thresholds: &ThresholdMap) -> Vec<Violation> {
    thresholds
        .iter()
        .filter_map(|(&sensor, threshold)| {
            let value = reading.value(sensor)?;
            threshold.violated_bound(value).map(|bound| Violation {
                sensor,
                value,
                bound,
            })
        })
        .collect()
}

/// Turn violations into a local advisory, or `None` when there are none
/// and the generation service should be consulted instead.
pub fn local_assessment(violations: &[Violation]) -> Option<Advisory> {
    if violations.is_empty() {
        return None;
    }
    let message = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(". ");
    Some(Advisory {
        message,
        severity: Severity::Attention,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::CompassDirection;

    fn reading() -> SensorReading {
        SensorReading {
            air_temperature: 36.0,
            air_humidity: 70.0,
            wind_speed: 12.0,
            wind_direction: CompassDirection::S,
            co2_concentration: 410.0,
            soil_moisture: 15.0,
            nitrogen: 150.0,
            soil_temperature: None,
            soil_ph: None,
            potassium: None,
            phosphorus: None,
            electrical_conductivity: None,
        }
    }

    #[test]
    fn describes_max_violation() {
        let thresholds = ThresholdMap::from([(SensorKind::AirTemperature, Threshold::max(30.0))]);
        let violations = evaluate(&reading(), &thresholds);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "air temperature 36°C exceeds max 30°C"
        );
    }

    #[test]
    fn describes_min_violation_with_decimals() {
        let mut r = reading();
        r.soil_moisture = 15.04;
        let thresholds = ThresholdMap::from([(SensorKind::SoilMoisture, Threshold::min(20.5))]);
        let violations = evaluate(&r, &thresholds);
        assert_eq!(violations[0].to_string(), "soil moisture 15% below min 20.5%");
    }

    #[test]
    fn collects_all_violations() {
        let thresholds = ThresholdMap::from([
            (SensorKind::AirTemperature, Threshold::max(30.0)),
            (SensorKind::SoilMoisture, Threshold::min(20.0)),
            (SensorKind::AirHumidity, Threshold::between(40.0, 90.0)),
            (SensorKind::Co2, Threshold::max(400.0)),
        ]);
        let violations = evaluate(&reading(), &thresholds);
        // air temperature, soil moisture and CO2 fail; humidity passes.
        assert_eq!(violations.len(), 3);
        let sensors: Vec<_> = violations.iter().map(|v| v.sensor).collect();
        assert!(sensors.contains(&SensorKind::AirTemperature));
        assert!(sensors.contains(&SensorKind::SoilMoisture));
        assert!(sensors.contains(&SensorKind::Co2));
    }

    #[test]
    fn count_is_independent_of_insertion_order() {
        let entries = [
            (SensorKind::Co2, Threshold::max(400.0)),
            (SensorKind::SoilMoisture, Threshold::min(20.0)),
            (SensorKind::AirTemperature, Threshold::max(30.0)),
            (SensorKind::Nitrogen, Threshold::between(100.0, 200.0)),
        ];
        let forward: ThresholdMap = entries.iter().copied().collect();
        let backward: ThresholdMap = entries.iter().rev().copied().collect();
        assert_eq!(
            evaluate(&reading(), &forward),
            evaluate(&reading(), &backward)
        );
        assert_eq!(evaluate(&reading(), &forward).len(), 3);
    }

    #[test]
    fn boundary_value_is_not_a_violation() {
        let mut r = reading();
        r.air_temperature = 30.0;
        let thresholds =
            ThresholdMap::from([(SensorKind::AirTemperature, Threshold::between(30.0, 30.0))]);
        assert!(evaluate(&r, &thresholds).is_empty());
    }

    #[test]
    fn absent_bounds_and_absent_sensors_are_unconstrained() {
        let thresholds = ThresholdMap::from([
            (SensorKind::AirTemperature, Threshold::default()),
            (SensorKind::SoilPh, Threshold::between(6.0, 7.0)),
        ]);
        assert!(evaluate(&reading(), &thresholds).is_empty());
    }

    #[test]
    fn local_assessment_joins_messages() {
        let thresholds = ThresholdMap::from([
            (SensorKind::AirTemperature, Threshold::max(30.0)),
            (SensorKind::SoilMoisture, Threshold::min(20.0)),
        ]);
        let violations = evaluate(&reading(), &thresholds);
        let advisory = local_assessment(&violations).expect("violations present");
        assert_eq!(advisory.severity, Severity::Attention);
        assert_eq!(
            advisory.message,
            "air temperature 36°C exceeds max 30°C. soil moisture 15% below min 20%"
        );
    }

    #[test]
    fn local_assessment_defers_when_clean() {
        assert!(local_assessment(&[]).is_none());
    }
}

//! Multi-sensor reading snapshot and the sensor vocabulary around it.
//!
//! A [`SensorReading`] carries six mandatory measurements, the wind
//! direction, and five optional soil measurements. [`SensorKind`] names
//! every numeric field so thresholds, simulation bounds and prompts can be
//! keyed uniformly instead of by display strings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// SensorKind
// ---------------------------------------------------------------------------

/// Every numeric measurement a reading can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensorKind {
    AirTemperature,
    AirHumidity,
    WindSpeed,
    #[serde(rename = "co2Concentration")]
    Co2,
    SoilMoisture,
    Nitrogen,
    SoilTemperature,
    SoilPh,
    Potassium,
    Phosphorus,
    ElectricalConductivity,
}

impl SensorKind {
    /// All kinds, mandatory fields first.
    pub const ALL: [SensorKind; 11] = [
        SensorKind::AirTemperature,
        SensorKind::AirHumidity,
        SensorKind::WindSpeed,
        SensorKind::Co2,
        SensorKind::SoilMoisture,
        SensorKind::Nitrogen,
        SensorKind::SoilTemperature,
        SensorKind::SoilPh,
        SensorKind::Potassium,
        SensorKind::Phosphorus,
        SensorKind::ElectricalConductivity,
    ];

    /// Stable camelCase key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            SensorKind::AirTemperature => "airTemperature",
            SensorKind::AirHumidity => "airHumidity",
            SensorKind::WindSpeed => "windSpeed",
            SensorKind::Co2 => "co2Concentration",
            SensorKind::SoilMoisture => "soilMoisture",
            SensorKind::Nitrogen => "nitrogen",
            SensorKind::SoilTemperature => "soilTemperature",
            SensorKind::SoilPh => "soilPh",
            SensorKind::Potassium => "potassium",
            SensorKind::Phosphorus => "phosphorus",
            SensorKind::ElectricalConductivity => "electricalConductivity",
        }
    }

    /// Lower-case human label used in alert messages and prompts.
    pub fn label(self) -> &'static str {
        match self {
            SensorKind::AirTemperature => "air temperature",
            SensorKind::AirHumidity => "air humidity",
            SensorKind::WindSpeed => "wind speed",
            SensorKind::Co2 => "CO2 concentration",
            SensorKind::SoilMoisture => "soil moisture",
            SensorKind::Nitrogen => "nitrogen",
            SensorKind::SoilTemperature => "soil temperature",
            SensorKind::SoilPh => "soil pH",
            SensorKind::Potassium => "potassium",
            SensorKind::Phosphorus => "phosphorus",
            SensorKind::ElectricalConductivity => "electrical conductivity",
        }
    }

    /// Display unit, appended directly after the value (empty for pH).
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::AirTemperature | SensorKind::SoilTemperature => "°C",
            SensorKind::AirHumidity | SensorKind::SoilMoisture => "%",
            SensorKind::WindSpeed => " km/h",
            SensorKind::Co2
            | SensorKind::Nitrogen
            | SensorKind::Potassium
            | SensorKind::Phosphorus => " ppm",
            SensorKind::SoilPh => "",
            SensorKind::ElectricalConductivity => " dS/m",
        }
    }

    /// Parse a camelCase key as produced by [`SensorKind::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// CompassDirection
// ---------------------------------------------------------------------------

/// Eight-point compass used for wind direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassDirection {
    /// Clockwise order starting at north.
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|d| *d == self)
            .unwrap_or_default()
    }

    /// Move `delta` points around the compass, wrapping in both directions.
    pub fn step(self, delta: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let next = (self.index() as i32 + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompassDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown compass direction '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// SensorReading
// ---------------------------------------------------------------------------

/// A value handed to the generation service: numbers for measurements,
/// text for symbolic fields such as wind direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

/// One multi-sensor measurement snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// °C
    pub air_temperature: f64,
    /// %
    pub air_humidity: f64,
    /// km/h
    pub wind_speed: f64,
    pub wind_direction: CompassDirection,
    /// ppm
    pub co2_concentration: f64,
    /// %
    pub soil_moisture: f64,
    /// ppm
    pub nitrogen: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_conductivity: Option<f64>,
}

impl SensorReading {
    /// Current value of `kind`, or `None` when an optional field is absent.
    pub fn value(&self, kind: SensorKind) -> Option<f64> {
        match kind {
            SensorKind::AirTemperature => Some(self.air_temperature),
            SensorKind::AirHumidity => Some(self.air_humidity),
            SensorKind::WindSpeed => Some(self.wind_speed),
            SensorKind::Co2 => Some(self.co2_concentration),
            SensorKind::SoilMoisture => Some(self.soil_moisture),
            SensorKind::Nitrogen => Some(self.nitrogen),
            SensorKind::SoilTemperature => self.soil_temperature,
            SensorKind::SoilPh => self.soil_ph,
            SensorKind::Potassium => self.potassium,
            SensorKind::Phosphorus => self.phosphorus,
            SensorKind::ElectricalConductivity => self.electrical_conductivity,
        }
    }

    /// Mutable access to the slot backing `kind`.
    pub(crate) fn slot_mut(&mut self, kind: SensorKind) -> Slot<'_> {
        match kind {
            SensorKind::AirTemperature => Slot::Required(&mut self.air_temperature),
            SensorKind::AirHumidity => Slot::Required(&mut self.air_humidity),
            SensorKind::WindSpeed => Slot::Required(&mut self.wind_speed),
            SensorKind::Co2 => Slot::Required(&mut self.co2_concentration),
            SensorKind::SoilMoisture => Slot::Required(&mut self.soil_moisture),
            SensorKind::Nitrogen => Slot::Required(&mut self.nitrogen),
            SensorKind::SoilTemperature => Slot::Optional(&mut self.soil_temperature),
            SensorKind::SoilPh => Slot::Optional(&mut self.soil_ph),
            SensorKind::Potassium => Slot::Optional(&mut self.potassium),
            SensorKind::Phosphorus => Slot::Optional(&mut self.phosphorus),
            SensorKind::ElectricalConductivity => {
                Slot::Optional(&mut self.electrical_conductivity)
            }
        }
    }

    /// Flatten into the `name -> number|string` map sent to the generation
    /// service. Absent optional fields are omitted.
    pub fn sensor_values(&self) -> BTreeMap<String, SensorValue> {
        let mut values: BTreeMap<String, SensorValue> = SensorKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.value(kind)
                    .map(|v| (kind.key().to_string(), SensorValue::Number(v)))
            })
            .collect();
        values.insert(
            "windDirection".to_string(),
            SensorValue::Text(self.wind_direction.to_string()),
        );
        values
    }
}

/// Borrowed storage for one measurement.
pub(crate) enum Slot<'a> {
    Required(&'a mut f64),
    Optional(&'a mut Option<f64>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> SensorReading {
        SensorReading {
            air_temperature: 25.1,
            air_humidity: 75.2,
            wind_speed: 10.5,
            wind_direction: CompassDirection::NE,
            co2_concentration: 400.0,
            soil_moisture: 65.0,
            nitrogen: 150.0,
            soil_temperature: None,
            soil_ph: Some(6.8),
            potassium: None,
            phosphorus: None,
            electrical_conductivity: None,
        }
    }

    #[test]
    fn compass_wraps_both_ways() {
        assert_eq!(CompassDirection::NW.step(1), CompassDirection::N);
        assert_eq!(CompassDirection::N.step(-1), CompassDirection::NW);
        assert_eq!(CompassDirection::E.step(0), CompassDirection::E);
        assert_eq!(CompassDirection::S.step(9), CompassDirection::SW);
    }

    #[test]
    fn compass_parses_case_insensitively() {
        assert_eq!("sw".parse::<CompassDirection>().unwrap(), CompassDirection::SW);
        assert!("L".parse::<CompassDirection>().is_err());
    }

    #[test]
    fn keys_round_trip() {
        for kind in SensorKind::ALL {
            assert_eq!(SensorKind::from_key(kind.key()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.key()));
        }
        assert_eq!(SensorKind::from_key("solarRadiation"), None);
    }

    #[test]
    fn sensor_values_skip_absent_optionals() {
        let values = reading().sensor_values();
        assert_eq!(values["airTemperature"], SensorValue::Number(25.1));
        assert_eq!(values["soilPh"], SensorValue::Number(6.8));
        assert_eq!(values["windDirection"], SensorValue::Text("NE".into()));
        assert!(!values.contains_key("potassium"));
        // 6 mandatory + 1 optional + wind direction
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn reading_serializes_camel_case() {
        let json = serde_json::to_value(reading()).unwrap();
        assert_eq!(json["co2Concentration"], 400.0);
        assert_eq!(json["windDirection"], "NE");
        assert!(json.get("potassium").is_none());
    }
}

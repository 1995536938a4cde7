//! Immutable simulation configuration.
//!
//! Built once and handed to the [`Simulator`](crate::simulation::Simulator)
//! at construction so tests can substitute their own bounds and
//! probabilities.

use std::collections::BTreeMap;

use crate::reading::SensorKind;

/// Random-walk parameters for a single measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Maximum absolute change per tick.
    pub delta: f64,
    /// Lowest physically plausible value.
    pub min: f64,
    /// Highest physically plausible value.
    pub max: f64,
}

impl FieldSpec {
    pub const fn new(delta: f64, min: f64, max: f64) -> Self {
        Self { delta, min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Everything the simulator needs to advance a reading.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub fields: BTreeMap<SensorKind, FieldSpec>,
    /// Probability per tick that the wind direction moves one compass point.
    pub wind_shift_probability: f64,
    /// Probability per tick that the crop advances to its next growth stage.
    pub stage_advance_probability: f64,
}

impl SimulationConfig {
    /// Spec for `kind`. Kinds missing from the map are left untouched by
    /// the simulator.
    pub fn field(&self, kind: SensorKind) -> Option<&FieldSpec> {
        self.fields.get(&kind)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let fields = BTreeMap::from([
            (SensorKind::AirTemperature, FieldSpec::new(0.15, 10.0, 45.0)),
            (SensorKind::AirHumidity, FieldSpec::new(0.25, 30.0, 95.0)),
            (SensorKind::WindSpeed, FieldSpec::new(0.25, 0.0, 40.0)),
            (SensorKind::Co2, FieldSpec::new(1.0, 380.0, 450.0)),
            (SensorKind::SoilMoisture, FieldSpec::new(0.5, 20.0, 90.0)),
            (SensorKind::Nitrogen, FieldSpec::new(1.0, 0.0, 300.0)),
            (SensorKind::SoilTemperature, FieldSpec::new(0.1, 10.0, 40.0)),
            (SensorKind::SoilPh, FieldSpec::new(0.01, 3.5, 9.0)),
            (SensorKind::Potassium, FieldSpec::new(1.0, 0.0, 400.0)),
            (SensorKind::Phosphorus, FieldSpec::new(0.5, 0.0, 200.0)),
            (SensorKind::ElectricalConductivity, FieldSpec::new(0.02, 0.0, 5.0)),
        ]);

        Self {
            fields,
            wind_shift_probability: 0.10,
            stage_advance_probability: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_kind() {
        let config = SimulationConfig::default();
        for kind in SensorKind::ALL {
            let spec = config.field(kind).expect("every kind has a spec");
            assert!(spec.min < spec.max, "{kind} bounds are ordered");
            assert!(spec.delta > 0.0);
        }
    }

    #[test]
    fn clamp_respects_bounds() {
        let spec = FieldSpec::new(1.0, 10.0, 45.0);
        assert_eq!(spec.clamp(50.0), 45.0);
        assert_eq!(spec.clamp(-3.0), 10.0);
        assert_eq!(spec.clamp(20.0), 20.0);
        assert!(spec.contains(45.0));
        assert!(!spec.contains(45.01));
    }
}

//! Fixed-length, time-ordered window of past readings for charting.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reading::SensorReading;
use crate::types::Timestamp;

/// Default window length: one entry per simulated day for a month.
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

/// One snapshot per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Chart axis label.
    pub time: String,
    pub recorded_at: Timestamp,
    #[serde(flatten)]
    pub reading: SensorReading,
}

impl HistoryEntry {
    /// Entry stamped with the current time, labelled `dd/mm HH:MM:SS`.
    pub fn now(reading: SensorReading) -> Self {
        let recorded_at = Utc::now();
        Self {
            time: recorded_at.format("%d/%m %H:%M:%S").to_string(),
            recorded_at,
            reading,
        }
    }
}

/// Chart period selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
}

impl Period {
    /// Number of most recent entries shown for this period.
    pub fn entries(self) -> usize {
        match self {
            Period::Day => 1,
            Period::Week => 7,
            Period::Month => 30,
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Period::Day),
            "7d" => Ok(Period::Week),
            "30d" => Ok(Period::Month),
            other => Err(CoreError::Validation(format!(
                "unknown period '{other}', expected 24h, 7d or 30d"
            ))),
        }
    }
}

/// Rolling window of [`HistoryEntry`] values, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a buffer from existing entries, keeping only the newest
    /// `capacity` of them.
    pub fn from_entries(capacity: usize, entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        let mut buffer = Self::with_capacity(capacity);
        for entry in entries {
            buffer.push(entry);
        }
        buffer
    }

    /// Append an entry, dropping the oldest first when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The last `n` entries in chronological order. Asking for more than
    /// exist returns everything.
    pub fn last(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Entries for a chart period.
    pub fn slice(&self, period: Period) -> Vec<&HistoryEntry> {
        self.last(period.entries()).collect()
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::CompassDirection;

    fn entry(time: &str) -> HistoryEntry {
        HistoryEntry {
            time: time.to_string(),
            recorded_at: Utc::now(),
            reading: SensorReading {
                air_temperature: 25.0,
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
            },
        }
    }

    fn full_buffer(capacity: usize) -> HistoryBuffer {
        HistoryBuffer::from_entries(capacity, (1..=capacity).map(|i| entry(&i.to_string())))
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let mut buffer = full_buffer(30);
        assert_eq!(buffer.len(), 30);

        buffer.push(entry("31"));

        assert_eq!(buffer.len(), 30);
        let times: Vec<_> = buffer.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times.first(), Some(&"2"));
        assert_eq!(times.last(), Some(&"31"));
        let expected: Vec<String> = (2..=31).map(|i| i.to_string()).collect();
        assert_eq!(times, expected);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut buffer = HistoryBuffer::with_capacity(24);
        for i in 0..100 {
            buffer.push(entry(&i.to_string()));
            assert!(buffer.len() <= 24);
        }
        assert_eq!(buffer.newest().unwrap().time, "99");
    }

    #[test]
    fn slice_by_period() {
        let buffer = full_buffer(30);
        let day = buffer.slice(Period::Day);
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].time, "30");

        let week: Vec<_> = buffer.slice(Period::Week).iter().map(|e| e.time.clone()).collect();
        assert_eq!(week, ["24", "25", "26", "27", "28", "29", "30"]);

        assert_eq!(buffer.slice(Period::Month).len(), 30);
    }

    #[test]
    fn slice_larger_than_buffer_returns_everything() {
        let buffer = full_buffer(3);
        assert_eq!(buffer.slice(Period::Week).len(), 3);
        assert_eq!(buffer.last(100).count(), 3);
    }

    #[test]
    fn period_parses_and_serializes() {
        assert_eq!("7d".parse::<Period>().unwrap(), Period::Week);
        assert!("1y".parse::<Period>().is_err());
        assert_eq!(serde_json::to_string(&Period::Day).unwrap(), "\"24h\"");
        assert_eq!(Period::default(), Period::Month);
    }

    #[test]
    fn entry_flattens_reading() {
        let json = serde_json::to_value(entry("01/01")).unwrap();
        assert_eq!(json["time"], "01/01");
        assert_eq!(json["airTemperature"], 25.0);
    }
}

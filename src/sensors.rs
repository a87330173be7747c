//! Sensor readings and the rolling verdict history.

use std::collections::VecDeque;

use crate::inference::AnomalyResult;

/// Number of readings the sensor panel keeps by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// One of the three editable sensor channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorField {
    Vibration,
    Temperature,
    Pressure,
}

impl SensorField {
    pub const ALL: [SensorField; 3] = [Self::Vibration, Self::Temperature, Self::Pressure];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vibration => "Vibration",
            Self::Temperature => "Temperature",
            Self::Pressure => "Pressure",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Vibration => 0,
            Self::Temperature => 1,
            Self::Pressure => 2,
        }
    }
}

/// Values submitted to the anomaly detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorInput {
    pub vibration: f64,
    pub temperature: f64,
    pub pressure: f64,
}

impl Default for SensorInput {
    fn default() -> Self {
        Self {
            vibration: 0.5,
            temperature: 25.0,
            pressure: 1.2,
        }
    }
}

impl SensorInput {
    pub fn get(&self, field: SensorField) -> f64 {
        match field {
            SensorField::Vibration => self.vibration,
            SensorField::Temperature => self.temperature,
            SensorField::Pressure => self.pressure,
        }
    }

    pub fn set(&mut self, field: SensorField, value: f64) {
        match field {
            SensorField::Vibration => self.vibration = value,
            SensorField::Temperature => self.temperature = value,
            SensorField::Pressure => self.pressure = value,
        }
    }
}

/// Parse user text as a number, treating anything unparsable as zero.
pub fn parse_or_zero(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Input snapshot plus the verdict it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    /// Local wall-clock label, e.g. `14:03:27`.
    pub timestamp: String,
    pub vibration: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub anomaly: bool,
    pub error: f64,
}

impl SensorReading {
    pub fn new(timestamp: impl Into<String>, input: &SensorInput, result: &AnomalyResult) -> Self {
        Self {
            timestamp: timestamp.into(),
            vibration: input.vibration,
            temperature: input.temperature,
            pressure: input.pressure,
            anomaly: result.anomaly,
            error: result.reconstruction_error,
        }
    }

    pub fn value(&self, field: SensorField) -> f64 {
        match field {
            SensorField::Vibration => self.vibration,
            SensorField::Temperature => self.temperature,
            SensorField::Pressure => self.pressure,
        }
    }
}

/// Fixed-capacity FIFO of readings, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorHistory {
    readings: VecDeque<SensorReading>,
    capacity: usize,
}

impl Default for SensorHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SensorHistory {
    /// A zero capacity is raised to one so the latest reading is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest ones beyond capacity.
    pub fn push(&mut self, reading: SensorReading) {
        while self.readings.len() >= self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SensorReading> + ExactSizeIterator {
        self.readings.iter()
    }

    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.back()
    }

    /// Values of one channel in history order.
    pub fn series(&self, field: SensorField) -> Vec<f64> {
        self.readings.iter().map(|r| r.value(field)).collect()
    }

    pub fn summary(&self) -> HistorySummary {
        let count = self.readings.len();
        let anomalies = self.readings.iter().filter(|r| r.anomaly).count();
        let (sum, max) = self
            .readings
            .iter()
            .fold((0.0f64, None::<f64>), |(sum, max), r| {
                (sum + r.error, Some(max.map_or(r.error, |m| m.max(r.error))))
            });
        HistorySummary {
            count,
            anomalies,
            mean_error: (count > 0).then(|| sum / count as f64),
            max_error: max,
        }
    }
}

/// Aggregate view of the readings currently in a [`SensorHistory`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistorySummary {
    pub count: usize,
    pub anomalies: usize,
    pub mean_error: Option<f64>,
    pub max_error: Option<f64>,
}

//! Range validation of acquired readings.
//!
//! The validator runs after every cycle when enabled and reports each
//! present value that falls outside its configured inclusive `[min, max]`.
//! It is purely observational: values are never altered or dropped, and a
//! violation only turns into a warning downstream.
//!
//! The limits are independent of the analog calibration endpoints; a limit
//! narrower than a calibration range simply produces warnings.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::app::record::{Field, SensorRecord};

/// Inclusive bounds for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub min: f32,
    pub max: f32,
}

impl Limit {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Per-field limits, keyed the way the config document names them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub temperature: Limit,
    pub humidity: Limit,
    pub soil_moisture: Limit,
    pub pressure: Limit,
    pub light: Limit,
    pub rain: Limit,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            temperature: Limit::new(-40.0, 80.0),
            humidity: Limit::new(0.0, 100.0),
            soil_moisture: Limit::new(0.0, 100.0),
            pressure: Limit::new(300.0, 1100.0),
            light: Limit::new(0.0, 100.0),
            rain: Limit::new(0.0, 100.0),
        }
    }
}

impl ValidationLimits {
    pub fn for_field(&self, field: Field) -> Limit {
        match field {
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::SoilMoisture => self.soil_moisture,
            Field::Light => self.light,
            Field::Rain => self.rain,
            Field::Pressure => self.pressure,
        }
    }
}

/// A present value outside its limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitViolation {
    pub field: Field,
    pub value: f32,
    pub limit: Limit,
}

/// Check every present field of `record` against `limits`.
pub fn check(record: &SensorRecord, limits: &ValidationLimits) -> Vec<LimitViolation, 6> {
    let mut out = Vec::new();
    for field in Field::ALL {
        let Some(value) = record.get(field) else {
            continue;
        };
        let limit = limits.for_field(field);
        if !limit.contains(value) {
            // Capacity equals the number of fields, so this never fails.
            let _ = out.push(LimitViolation {
                field,
                value,
                limit,
            });
        }
    }
    out
}

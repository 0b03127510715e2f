//! Two-point linear calibration for the resistive/capacitive analog sensors.
//!
//! Every analog probe is characterised by two raw ADC readings: the one
//! that corresponds to 0 % and the one that corresponds to 100 %.  The raw
//! sample is clamped into that range *before* the linear map, so the result
//! saturates at exactly 0 or 100 instead of extrapolating past the
//! characterised range.
//!
//! The endpoints carry their direction: for soil moisture and rain the
//! dry (0 %) reading is the *higher* raw value.

use serde::{Deserialize, Serialize};

/// Raw-domain endpoints that map to 0 % and 100 %.
///
/// Callers must make sure the two endpoints differ; the config loader
/// rejects equal endpoints before a range is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRange {
    /// Raw value that converts to 0 %.
    pub zero: u16,
    /// Raw value that converts to 100 %.
    pub full: u16,
}

impl CalibrationRange {
    pub const fn new(zero: u16, full: u16) -> Self {
        Self { zero, full }
    }

    pub fn is_degenerate(&self) -> bool {
        self.zero == self.full
    }

    /// Clamp `raw` into the range and map it linearly onto 0..=100.
    pub fn percent(&self, raw: u16) -> f32 {
        let lo = self.zero.min(self.full);
        let hi = self.zero.max(self.full);
        let clamped = raw.clamp(lo, hi);
        let zero = f32::from(self.zero);
        (zero - f32::from(clamped)) / (zero - f32::from(self.full)) * 100.0
    }
}

/// Wet/dry calibration as written in the config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WetDryCalibration {
    /// Raw reading in dry air (0 %).
    pub dry: u16,
    /// Raw reading fully immersed / soaked (100 %).
    pub wet: u16,
}

impl From<WetDryCalibration> for CalibrationRange {
    fn from(c: WetDryCalibration) -> Self {
        Self::new(c.dry, c.wet)
    }
}

/// Light sensor calibration as written in the config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightCalibration {
    /// Raw reading at the dark end of the divider.
    pub min: u16,
    /// Raw reading at the bright end of the divider.
    pub max: u16,
}

impl From<LightCalibration> for CalibrationRange {
    /// The light divider reads `(max - raw) / (max - min)`, so `max` is the
    /// 0 % endpoint.
    fn from(c: LightCalibration) -> Self {
        Self::new(c.max, c.min)
    }
}

/// Soil moisture percentage; higher raw = drier.
pub fn soil_moisture_percent(raw: u16, cal: WetDryCalibration) -> f32 {
    CalibrationRange::from(cal).percent(raw)
}

/// Light level percentage.
pub fn light_percent(raw: u16, cal: LightCalibration) -> f32 {
    CalibrationRange::from(cal).percent(raw)
}

/// Rain wetness percentage; same shape as soil moisture.
pub fn rain_percent(raw: u16, cal: WetDryCalibration) -> f32 {
    CalibrationRange::from(cal).percent(raw)
}

//! Logger configuration.
//!
//! One JSON document read at startup.  Every key is optional and falls back
//! to the defaults below; unknown keys are ignored.  [`validate`] rejects
//! values that would make the acquisition loop misbehave rather than
//! silently clamping them.

use core::fmt::Write as _;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::sensors::bmp180::{MAX_OVERSAMPLING, STD_SEA_LEVEL_HPA};
use crate::sensors::calibration::{CalibrationRange, LightCalibration, WetDryCalibration};
use crate::validation::ValidationLimits;

/// Core logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    // --- Timing ---
    /// Sleep between cycles (seconds), measured from the end of a cycle.
    pub log_interval: u64,

    // --- Storage ---
    /// strftime-style format of the record timestamp.
    pub timestamp_format: String,
    /// Directory holding one file per calendar day.
    pub data_folder: PathBuf,
    /// Extension of the daily files.
    pub file_extension: String,

    // --- Logging ---
    /// DEBUG / INFO / WARNING / ERROR / CRITICAL (case-insensitive).
    pub log_level: String,

    // --- Validation ---
    pub validation: ValidationConfig,

    // --- Sensors ---
    pub calibration: CalibrationConfig,
    pub barometer: BarometerConfig,
    /// IIO device directory of the DHT22 kernel driver.
    pub dht_device: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub limits: ValidationLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: ValidationLimits::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub soil: WetDryCalibration,
    pub light: LightCalibration,
    pub rain: WetDryCalibration,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            soil: WetDryCalibration { dry: 930, wet: 415 },
            light: LightCalibration { min: 0, max: 1023 },
            rain: WetDryCalibration { dry: 1023, wet: 300 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarometerConfig {
    /// Oversampling setting 0..=3.
    pub oversampling: u8,
    /// Reference pressure for the altitude estimate (hPa).
    pub sea_level_hpa: f32,
}

impl Default for BarometerConfig {
    fn default() -> Self {
        Self {
            oversampling: MAX_OVERSAMPLING,
            sea_level_hpa: STD_SEA_LEVEL_HPA,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_interval: 60,
            timestamp_format: "%Y-%m-%d %H:%M:%S".into(),
            data_folder: PathBuf::from("data"),
            file_extension: "csv".into(),
            log_level: "INFO".into(),
            validation: ValidationConfig::default(),
            calibration: CalibrationConfig::default(),
            barometer: BarometerConfig::default(),
            dht_device: PathBuf::from("/sys/bus/iio/devices/iio:device0"),
        }
    }
}

impl LoggerConfig {
    /// Level filter for the logging backend.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_log_level(&self.log_level)
    }
}

/// Map the document's verbosity names onto `log` levels.
pub fn parse_log_level(name: &str) -> Result<LevelFilter, ConfigError> {
    match name.to_ascii_uppercase().as_str() {
        "TRACE" => Ok(LevelFilter::Trace),
        "DEBUG" => Ok(LevelFilter::Debug),
        "INFO" => Ok(LevelFilter::Info),
        "WARN" | "WARNING" => Ok(LevelFilter::Warn),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::Error),
        "OFF" => Ok(LevelFilter::Off),
        _ => Err(ConfigError::ValidationFailed(
            "log_level must be DEBUG, INFO, WARNING, ERROR or CRITICAL",
        )),
    }
}

/// A format that chrono cannot parse, or cannot render for a timestamp
/// without an offset (`%z`, `%Z`, ...), would fail every write.
pub fn validate_timestamp_format(fmt: &str) -> Result<(), ConfigError> {
    let invalid = ConfigError::ValidationFailed(
        "timestamp_format is not a valid strftime format for local time",
    );
    if fmt.is_empty() || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(invalid);
    }
    let mut sample = String::new();
    write!(sample, "{}", NaiveDateTime::default().format(fmt)).map_err(|_| invalid)
}

/// Range-check a configuration before the logger uses it.
pub fn validate(cfg: &LoggerConfig) -> Result<(), ConfigError> {
    if cfg.log_interval == 0 {
        return Err(ConfigError::ValidationFailed("log_interval must be >= 1"));
    }
    validate_timestamp_format(&cfg.timestamp_format)?;
    if cfg.file_extension.is_empty() || cfg.file_extension.contains(['/', '\\']) {
        return Err(ConfigError::ValidationFailed(
            "file_extension must be a plain, non-empty extension",
        ));
    }
    parse_log_level(&cfg.log_level)?;

    let limits = &cfg.validation.limits;
    for limit in [
        limits.temperature,
        limits.humidity,
        limits.soil_moisture,
        limits.pressure,
        limits.light,
        limits.rain,
    ] {
        if !limit.is_well_formed() {
            return Err(ConfigError::ValidationFailed(
                "validation limits need finite min <= max",
            ));
        }
    }

    let cal = &cfg.calibration;
    if CalibrationRange::from(cal.soil).is_degenerate() {
        return Err(ConfigError::ValidationFailed(
            "calibration.soil dry and wet must differ",
        ));
    }
    if CalibrationRange::from(cal.light).is_degenerate() {
        return Err(ConfigError::ValidationFailed(
            "calibration.light min and max must differ",
        ));
    }
    if CalibrationRange::from(cal.rain).is_degenerate() {
        return Err(ConfigError::ValidationFailed(
            "calibration.rain dry and wet must differ",
        ));
    }

    if cfg.barometer.oversampling > MAX_OVERSAMPLING {
        return Err(ConfigError::ValidationFailed(
            "barometer.oversampling must be 0-3",
        ));
    }
    if !(cfg.barometer.sea_level_hpa.is_finite() && cfg.barometer.sea_level_hpa > 0.0) {
        return Err(ConfigError::ValidationFailed(
            "barometer.sea_level_hpa must be positive",
        ));
    }
    Ok(())
}

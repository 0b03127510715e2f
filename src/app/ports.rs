//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AcquisitionService (domain)
//! ```
//!
//! Driven adapters (sensor hub, record sink, clock, event sink, config
//! file) implement these traits.  The
//! [`AcquisitionService`](super::service::AcquisitionService) consumes them
//! via generics, so the domain core never touches a bus or a file directly.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::LoggerConfig;
use crate::error::{SensorError, SinkError};
use crate::sensors::bmp180::BarometerReading;
use crate::sensors::dht::DhtReading;

use super::record::SensorRecord;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one method per source so a failure stays scoped to the
/// quantity it affects.
pub trait SensorPort {
    /// Soil moisture, 0–100 %.
    fn read_soil_moisture(&mut self) -> Result<f32, SensorError>;

    /// Ambient light, 0–100 %.
    fn read_light(&mut self) -> Result<f32, SensorError>;

    /// Rain wetness, 0–100 %.
    fn read_rain(&mut self) -> Result<f32, SensorError>;

    /// Compensated barometer measurement.
    fn read_barometer(&mut self) -> Result<BarometerReading, SensorError>;

    /// Temperature and humidity; both absent after a driver fault.
    fn read_temperature_humidity(&mut self) -> DhtReading;
}

// ───────────────────────────────────────────────────────────────
// Record sink port (driven adapter: domain → storage)
// ───────────────────────────────────────────────────────────────

/// Day-partitioned append-only record storage.
pub trait RecordSink {
    /// Make sure the file for `date` is the open one.  Returns `true` when
    /// a new file was opened.
    fn rotate_if_needed(&mut self, date: NaiveDate) -> Result<bool, SinkError>;

    /// Append one record and flush it.
    fn append(&mut self, record: &SensorRecord) -> Result<(), SinkError>;

    /// Flush and release the open file, if any.
    fn close(&mut self) -> Result<(), SinkError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Local wall-clock time used to stamp and partition records.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads the configuration document once at startup.
///
/// Implementations MUST run [`crate::config::validate`] before returning;
/// an invalid document is a fatal [`ConfigError`], never silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<LoggerConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist.
    NotFound,
    /// The file exists but could not be read.
    IoError,
    /// The document is not valid JSON for [`LoggerConfig`].
    Parse(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::IoError => write!(f, "I/O error"),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

//! Unified error types for the sensor logger.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! acquisition loop's error handling uniform. Sensor and sink variants are
//! `Copy` so a failed reading can be logged and dropped without allocation.
//!
//! Propagation policy: [`SensorError`] never leaves an acquisition cycle;
//! [`SinkError`], [`Error::Init`] and [`Error::Config`] end the process.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the logger funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read.
    Sensor(SensorError),
    /// The record sink could not be opened or appended to.
    Sink(SinkError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Sink(e) => write!(f, "sink: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// SPI or I2C transaction failed (BusFault).
    Bus,
    /// ADC channel outside 0..=7.
    InvalidChannel(u8),
    /// The temperature/humidity driver reported a checksum or timing failure.
    Driver,
    /// The calibration block produced a zero divisor.
    Compensation,
    /// The barometer answered with an unexpected chip ID.
    UnexpectedChipId(u8),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus transaction failed"),
            Self::InvalidChannel(ch) => write!(f, "ADC channel {ch} out of range (0-7)"),
            Self::Driver => write!(f, "driver reported a read failure"),
            Self::Compensation => write!(f, "calibration block yields a zero divisor"),
            Self::UnexpectedChipId(id) => write!(f, "unexpected chip ID 0x{id:02X}"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The data folder or daily file could not be created/opened.
    Open,
    /// Appending a row failed.
    Write,
    /// Flushing the row to disk failed.
    Flush,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "could not open log file"),
            Self::Write => write!(f, "could not append record"),
            Self::Flush => write!(f, "could not flush record"),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

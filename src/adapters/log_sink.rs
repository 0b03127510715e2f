//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! process logger (stderr via `env_logger` in production).  Level mapping:
//! per-cycle summaries at INFO, limit violations at WARNING, sensor faults
//! at ERROR and barometer side-channel values at DEBUG.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::record::{Field, SensorRecord};

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `T=21.50°C RH=40.00% ...` with `--` for absent values.
fn summary(record: &SensorRecord) -> String {
    Field::ALL
        .iter()
        .map(|&field| match record.get(field) {
            Some(v) => format!("{}={:.2}{}", short_name(field), v, field.unit()),
            None => format!("{}=--", short_name(field)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const fn short_name(field: Field) -> &'static str {
    match field {
        Field::Temperature => "T",
        Field::Humidity => "RH",
        Field::SoilMoisture => "soil",
        Field::Light => "light",
        Field::Rain => "rain",
        Field::Pressure => "P",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { interval_secs } => {
                info!("START | logging every {}s", interval_secs);
            }
            AppEvent::SensorFailed { field, error } => {
                error!("SENSOR | {} read failed: {}", field, error);
            }
            AppEvent::BarometerDetail {
                temperature_c,
                altitude_m,
            } => {
                debug!(
                    "BARO | die temperature {:.1}\u{00b0}C, altitude {:.2} m",
                    temperature_c, altitude_m
                );
            }
            AppEvent::LimitExceeded(v) => {
                warn!(
                    "LIMIT | {} {:.2}{} outside [{}, {}]",
                    v.field,
                    v.value,
                    v.field.unit(),
                    v.limit.min,
                    v.limit.max
                );
            }
            AppEvent::CycleCompleted { cycle, record } => {
                info!(
                    "CYCLE {} | {}/6 sensors | {}",
                    cycle,
                    record.present_count(),
                    summary(record)
                );
            }
            AppEvent::FileRotated(date) => {
                info!("FILE | new daily file for {}", date);
            }
            AppEvent::Stopped { cycles } => {
                info!("STOP | {} cycles logged", cycles);
            }
        }
    }
}

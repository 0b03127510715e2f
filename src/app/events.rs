//! Outbound application events.
//!
//! The [`AcquisitionService`](super::service::AcquisitionService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them; in production they go to the
//! log (see [`crate::adapters::log_sink`]).

use chrono::NaiveDate;

use crate::error::SensorError;
use crate::validation::LimitViolation;

use super::record::{Field, SensorRecord};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The acquisition loop is starting.
    Started { interval_secs: u64 },

    /// A sensor could not be read; the field is absent this cycle.
    SensorFailed { field: Field, error: SensorError },

    /// Barometer side-channel values (die temperature, altitude).
    BarometerDetail {
        temperature_c: f32,
        altitude_m: f32,
    },

    /// A present value lies outside its configured limit.
    LimitExceeded(LimitViolation),

    /// A record was produced (and, from `log_cycle`, persisted).
    CycleCompleted { cycle: u64, record: SensorRecord },

    /// The sink switched to a new daily file.
    FileRotated(NaiveDate),

    /// The acquisition loop stopped after `cycles` cycles.
    Stopped { cycles: u64 },
}

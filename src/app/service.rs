//! Application service: the hexagonal core.
//!
//! [`AcquisitionService`] runs one acquisition cycle at a time: it asks
//! every source for its reading, contains per-sensor failures, validates
//! the result and stamps it.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ RecordSink
//!       Clock ──▶ │   AcquisitionService     │ ──▶ EventSink
//!                 │ read · validate · stamp  │
//!                 └──────────────────────────┘
//! ```

use log::info;

use crate::config::{LoggerConfig, ValidationConfig};
use crate::error::{Error, SensorError};
use crate::validation;

use super::events::AppEvent;
use super::ports::{Clock, EventSink, RecordSink, SensorPort};
use super::record::{Field, SensorRecord};

// ───────────────────────────────────────────────────────────────
// AcquisitionService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one cycle of acquisition.
pub struct AcquisitionService {
    validation: ValidationConfig,
    sea_level_hpa: f32,
    cycle_count: u64,
}

impl AcquisitionService {
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            validation: config.validation,
            sea_level_hpa: config.barometer.sea_level_hpa,
            cycle_count: 0,
        }
    }

    /// Number of cycles run so far.
    pub fn cycles(&self) -> u64 {
        self.cycle_count
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Read every sensor once and return a complete record.
    ///
    /// Never fails: a sensor that cannot be read leaves its field absent
    /// and the remaining sensors are still read.  Out-of-range values are
    /// reported through `events` and recorded unchanged.
    pub fn run_cycle(
        &mut self,
        sensors: &mut impl SensorPort,
        clock: &impl Clock,
        events: &mut impl EventSink,
    ) -> SensorRecord {
        self.cycle_count += 1;

        // 1. Analog channels through the ADC
        let soil_moisture_pct = contain(Field::SoilMoisture, sensors.read_soil_moisture(), events);
        let light_pct = contain(Field::Light, sensors.read_light(), events);
        let rain_pct = contain(Field::Rain, sensors.read_rain(), events);

        // 2. Barometer
        let pressure_hpa = contain(Field::Pressure, sensors.read_barometer(), events).map(|baro| {
            events.emit(&AppEvent::BarometerDetail {
                temperature_c: baro.temperature_c,
                altitude_m: baro.altitude_m(self.sea_level_hpa),
            });
            baro.pressure_hpa
        });

        // 3. Temperature / humidity (faults already contained by the adapter)
        let dht = sensors.read_temperature_humidity();

        // 4. Stamp
        let record = SensorRecord {
            timestamp: clock.now(),
            temperature_c: dht.temperature_c,
            humidity_pct: dht.humidity_pct,
            soil_moisture_pct,
            light_pct,
            rain_pct,
            pressure_hpa,
        };

        // 5. Observational validation
        if self.validation.enabled {
            for violation in validation::check(&record, &self.validation.limits) {
                events.emit(&AppEvent::LimitExceeded(violation));
            }
        }

        record
    }

    /// Run a cycle and persist its record.
    ///
    /// The sink is rotated by the record's own date before the append, so
    /// a record always lands in the file of the day it was stamped.  Sink
    /// failures propagate; sensor failures never do.
    pub fn log_cycle(
        &mut self,
        sensors: &mut impl SensorPort,
        clock: &impl Clock,
        sink: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> Result<SensorRecord, Error> {
        let record = self.run_cycle(sensors, clock, events);

        let date = record.timestamp.date();
        if sink.rotate_if_needed(date)? {
            events.emit(&AppEvent::FileRotated(date));
        }
        sink.append(&record)?;

        events.emit(&AppEvent::CycleCompleted {
            cycle: self.cycle_count,
            record,
        });
        Ok(record)
    }

    /// Close the sink and report the number of completed cycles.
    pub fn shutdown(&self, sink: &mut impl RecordSink, events: &mut impl EventSink) -> Result<(), Error> {
        sink.close()?;
        events.emit(&AppEvent::Stopped {
            cycles: self.cycle_count,
        });
        info!("AcquisitionService stopped after {} cycles", self.cycle_count);
        Ok(())
    }
}

/// Turn a failed reading into an absent field plus a `SensorFailed` event.
fn contain<T>(
    field: Field,
    reading: Result<T, SensorError>,
    events: &mut impl EventSink,
) -> Option<T> {
    match reading {
        Ok(value) => Some(value),
        Err(error) => {
            events.emit(&AppEvent::SensorFailed { field, error });
            None
        }
    }
}

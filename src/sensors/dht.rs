//! DHT22 temperature / relative-humidity adapter.
//!
//! The single-wire bit timing lives in an external driver (on the Pi, the
//! kernel's `dht11` IIO driver); this module only decides what a failed
//! read means for the cycle.  DHT22 reads fail their checksum regularly,
//! so a fault yields two absent values and a log line, never an error.

use log::error;

use crate::error::SensorError;

/// Driver seam: each quantity can fault independently.
pub trait HygrometerDriver {
    /// Air temperature in °C.
    fn temperature(&mut self) -> Result<f32, SensorError>;
    /// Relative humidity in %.
    fn humidity(&mut self) -> Result<f32, SensorError>;
}

/// One temperature/humidity pair; both absent after a driver fault.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DhtReading {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
}

pub struct DhtSensor<D> {
    driver: D,
}

impl<D: HygrometerDriver> DhtSensor<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Read both quantities.  If either faults, neither is reported.
    pub fn read(&mut self) -> DhtReading {
        let pair = self
            .driver
            .temperature()
            .and_then(|t| self.driver.humidity().map(|h| (t, h)));
        match pair {
            Ok((t, h)) => DhtReading {
                temperature_c: Some(t),
                humidity_pct: Some(h),
            },
            Err(e) => {
                error!("DHT22: read failed ({}), temperature and humidity absent", e);
                DhtReading::default()
            }
        }
    }
}

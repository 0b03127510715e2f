//! DHT22 through the Linux `dht11` IIO driver.
//!
//! With `dtoverlay=dht11,gpiopin=26` the kernel does the single-wire timing
//! and exposes each quantity as a sysfs attribute in milli-units.  Every
//! attribute read triggers a fresh conversion, and a checksum or timeout
//! failure surfaces as an I/O error (typically `EIO` or `ETIMEDOUT`).

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::SensorError;
use crate::sensors::dht::HygrometerDriver;

const TEMPERATURE_ATTR: &str = "in_temp_input";
const HUMIDITY_ATTR: &str = "in_humidityrelative_input";

/// [`HygrometerDriver`] reading an IIO device directory such as
/// `/sys/bus/iio/devices/iio:device0`.
pub struct IioHygrometer {
    dir: PathBuf,
}

impl IioHygrometer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn device_dir(&self) -> &Path {
        &self.dir
    }

    fn read_milli(&self, attr: &str) -> Result<f32, SensorError> {
        let path = self.dir.join(attr);
        let text = fs::read_to_string(&path).map_err(|e| {
            debug!("IioHygrometer: {} unreadable: {}", path.display(), e);
            SensorError::Driver
        })?;
        parse_milli(&text).ok_or_else(|| {
            debug!("IioHygrometer: {} held {:?}", path.display(), text.trim());
            SensorError::Driver
        })
    }
}

/// Parse a sysfs milli-unit integer (`"21500\n"` → 21.5).
fn parse_milli(text: &str) -> Option<f32> {
    text.trim().parse::<i32>().ok().map(|v| v as f32 / 1000.0)
}

impl HygrometerDriver for IioHygrometer {
    fn temperature(&mut self) -> Result<f32, SensorError> {
        self.read_milli(TEMPERATURE_ATTR)
    }

    fn humidity(&mut self) -> Result<f32, SensorError> {
        self.read_milli(HUMIDITY_ATTR)
    }
}

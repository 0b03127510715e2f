//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every bus-facing driver for the lifetime of the process and
//! exposes them through [`SensorPort`].  Buses are opened once at startup
//! and handed in; nothing here reaches for a global handle.

pub mod bmp180;
pub mod calibration;
pub mod dht;
pub mod mcp3008;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

use crate::app::ports::SensorPort;
use crate::config::CalibrationConfig;
use crate::error::SensorError;
use crate::pins;
use bmp180::{BarometerReading, Bmp180};
use calibration::{light_percent, rain_percent, soil_moisture_percent};
use dht::{DhtReading, DhtSensor, HygrometerDriver};
use mcp3008::Mcp3008;

/// Aggregates all sensor drivers behind the sensor port.
pub struct SensorHub<SPI, I2C, D, H> {
    pub adc: Mcp3008<SPI>,
    pub barometer: Bmp180<I2C, D>,
    pub dht: DhtSensor<H>,
    calibration: CalibrationConfig,
}

impl<SPI, I2C, D, H> SensorHub<SPI, I2C, D, H>
where
    SPI: SpiDevice,
    I2C: I2c,
    D: DelayNs,
    H: HygrometerDriver,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where bus ownership is established).
    pub fn new(
        adc: Mcp3008<SPI>,
        barometer: Bmp180<I2C, D>,
        dht: DhtSensor<H>,
        calibration: CalibrationConfig,
    ) -> Self {
        Self {
            adc,
            barometer,
            dht,
            calibration,
        }
    }
}

impl<SPI, I2C, D, H> SensorPort for SensorHub<SPI, I2C, D, H>
where
    SPI: SpiDevice,
    I2C: I2c,
    D: DelayNs,
    H: HygrometerDriver,
{
    fn read_soil_moisture(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read_channel(pins::SOIL_MOISTURE_CHANNEL)?;
        Ok(soil_moisture_percent(raw, self.calibration.soil))
    }

    fn read_light(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read_channel(pins::LIGHT_CHANNEL)?;
        Ok(light_percent(raw, self.calibration.light))
    }

    fn read_rain(&mut self) -> Result<f32, SensorError> {
        let raw = self.adc.read_channel(pins::RAIN_CHANNEL)?;
        Ok(rain_percent(raw, self.calibration.rain))
    }

    fn read_barometer(&mut self) -> Result<BarometerReading, SensorError> {
        self.barometer.read()
    }

    fn read_temperature_humidity(&mut self) -> DhtReading {
        self.dht.read()
    }
}

//! Mock hardware and adapters for integration tests.
//!
//! The bus mocks emulate just enough of the MCP3008 and BMP180 protocols
//! to drive the real drivers; the port mocks record everything the
//! acquisition service does so tests can assert on it afterwards.

#![allow(dead_code)]

use std::cell::Cell;

use chrono::{NaiveDate, NaiveDateTime};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, I2c};
use embedded_hal::spi::{self, SpiDevice};

use sensorlog::app::events::AppEvent;
use sensorlog::app::ports::{Clock, EventSink, RecordSink, SensorPort};
use sensorlog::app::record::SensorRecord;
use sensorlog::error::{SensorError, SinkError};
use sensorlog::sensors::bmp180::BarometerReading;
use sensorlog::sensors::dht::{DhtReading, HygrometerDriver};

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

// ── MCP3008 over SPI ──────────────────────────────────────────

/// Answers each single-ended request with the configured raw sample of the
/// addressed channel.  The don't-care bits of the reply are set to 1 so the
/// driver's masking is exercised.
pub struct MockSpi {
    pub samples: [u16; 8],
    pub fail: bool,
    pub frames: Vec<[u8; 3]>,
}

impl MockSpi {
    pub fn new(samples: [u16; 8]) -> Self {
        Self {
            samples,
            fail: false,
            frames: Vec::new(),
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [spi::Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(spi::ErrorKind::Other);
        }
        for op in operations {
            if let spi::Operation::TransferInPlace(buf) = op {
                let frame = [buf[0], buf[1], buf[2]];
                self.frames.push(frame);
                let channel = usize::from((frame[1] >> 4) & 0x07);
                let raw = self.samples[channel] & 0x3FF;
                buf[0] = 0xFF;
                buf[1] = 0xFC | (raw >> 8) as u8;
                buf[2] = (raw & 0xFF) as u8;
            }
        }
        Ok(())
    }
}

// ── BMP180 over I2C ───────────────────────────────────────────

/// Datasheet calibration block (AC1..MD), in register order.
pub const DATASHEET_CALIBRATION: [i32; 11] = [
    408, -72, -14383, 32741, 32757, 23153, 6190, 4, -32768, -8711, 2868,
];

/// Register-file model of a BMP180.  Writing a conversion command to 0xF4
/// loads the raw temperature or pressure into 0xF6..0xF8.
pub struct MockI2c {
    pub regs: [u8; 256],
    pub raw_temperature: u16,
    /// Uncompensated pressure (UP) the driver should decode.
    pub raw_pressure: u32,
    pub fail: bool,
    pub addresses: Vec<u8>,
    pointer: u8,
}

impl MockI2c {
    pub fn bmp180(calibration: [i32; 11], raw_temperature: u16, raw_pressure: u32) -> Self {
        let mut regs = [0u8; 256];
        regs[0xD0] = 0x55;
        regs[0xD1] = 0x02;
        for (i, word) in calibration.iter().enumerate() {
            let bytes = (*word as u16).to_be_bytes();
            regs[0xAA + 2 * i] = bytes[0];
            regs[0xAA + 2 * i + 1] = bytes[1];
        }
        Self {
            regs,
            raw_temperature,
            raw_pressure,
            fail: false,
            addresses: Vec::new(),
            pointer: 0,
        }
    }

    /// Datasheet example: UT = 27898, UP = 23843 at OSS 0.
    pub fn datasheet() -> Self {
        Self::bmp180(DATASHEET_CALIBRATION, 27898, 23843)
    }

    fn command(&mut self, cmd: u8) {
        if cmd == 0x2E {
            let [msb, lsb] = self.raw_temperature.to_be_bytes();
            self.regs[0xF6] = msb;
            self.regs[0xF7] = lsb;
        } else if cmd & 0x3F == 0x34 {
            let oss = cmd >> 6;
            let value = self.raw_pressure << (8 - oss);
            self.regs[0xF6] = (value >> 16) as u8;
            self.regs[0xF7] = (value >> 8) as u8;
            self.regs[0xF8] = value as u8;
        }
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = i2c::ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(i2c::ErrorKind::NoAcknowledge(
                i2c::NoAcknowledgeSource::Address,
            ));
        }
        self.addresses.push(address);
        for op in operations {
            match op {
                i2c::Operation::Write(bytes) => {
                    if let Some((&reg, rest)) = bytes.split_first() {
                        self.pointer = reg;
                        if let Some(&value) = rest.first() {
                            self.regs[usize::from(reg)] = value;
                            if reg == 0xF4 {
                                self.command(value);
                            }
                        }
                    }
                }
                i2c::Operation::Read(buf) => {
                    let start = usize::from(self.pointer);
                    buf.copy_from_slice(&self.regs[start..start + buf.len()]);
                }
            }
        }
        Ok(())
    }
}

/// Counts requested delay instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── DHT22 ─────────────────────────────────────────────────────

pub struct MockHygrometer {
    pub temperature: Result<f32, SensorError>,
    pub humidity: Result<f32, SensorError>,
}

impl HygrometerDriver for MockHygrometer {
    fn temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature
    }

    fn humidity(&mut self) -> Result<f32, SensorError> {
        self.humidity
    }
}

// ── Sensor port ───────────────────────────────────────────────

/// Canned per-source results for driving the service directly.
pub struct MockSensors {
    pub soil: Result<f32, SensorError>,
    pub light: Result<f32, SensorError>,
    pub rain: Result<f32, SensorError>,
    pub barometer: Result<BarometerReading, SensorError>,
    pub dht: DhtReading,
    pub reads: u32,
}

impl MockSensors {
    /// Every source healthy with plausible values.
    pub fn healthy() -> Self {
        Self {
            soil: Ok(40.0),
            light: Ok(75.5),
            rain: Ok(0.0),
            barometer: Ok(BarometerReading {
                pressure_hpa: 1008.5,
                temperature_c: 21.3,
            }),
            dht: DhtReading {
                temperature_c: Some(21.0),
                humidity_pct: Some(55.0),
            },
            reads: 0,
        }
    }
}

impl SensorPort for MockSensors {
    fn read_soil_moisture(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.soil
    }

    fn read_light(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.light
    }

    fn read_rain(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.rain
    }

    fn read_barometer(&mut self) -> Result<BarometerReading, SensorError> {
        self.reads += 1;
        self.barometer
    }

    fn read_temperature_humidity(&mut self) -> DhtReading {
        self.reads += 1;
        self.dht
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

// ── Record sink ───────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<SensorRecord>,
    pub opened: Vec<NaiveDate>,
    pub current: Option<NaiveDate>,
    pub closed: bool,
    pub fail_append: bool,
}

impl RecordSink for MemorySink {
    fn rotate_if_needed(&mut self, date: NaiveDate) -> Result<bool, SinkError> {
        if self.current == Some(date) {
            return Ok(false);
        }
        self.current = Some(date);
        self.opened.push(date);
        Ok(true)
    }

    fn append(&mut self, record: &SensorRecord) -> Result<(), SinkError> {
        if self.fail_append {
            return Err(SinkError::Write);
        }
        self.records.push(*record);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.current = None;
        self.closed = true;
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<AppEvent>,
}

impl RecordingEvents {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

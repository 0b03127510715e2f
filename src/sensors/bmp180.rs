//! BMP180 barometric pressure sensor driver.
//!
//! The chip reports uncompensated temperature (UT) and pressure (UP) codes;
//! the physical values come out of the vendor's fixed-point compensation
//! sequence driven by 11 per-device calibration words stored in EEPROM.
//!
//! The calibration block is re-read on every measurement so a sensor that
//! was power-cycled between cycles is never compensated with stale words.
//!
//! ## Measurement sequence
//!
//! ```text
//!  read 0xAA..0xBF (22 B)  ─▶ CalibrationData
//!  write 0xF4 = 0x2E        ─▶ wait 5 ms  ─▶ read 0xF6..0xF7  = UT
//!  write 0xF4 = 0x34|oss<<6 ─▶ wait 40 ms ─▶ read 0xF6..0xF8  = UP
//!  compensate(cal, UT, UP, oss)
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::error::SensorError;
use crate::pins;

// Register map
pub const REG_CALIB_START: u8 = 0xAA;
pub const REG_CALIB_LENGTH: usize = 22;
pub const REG_CHIP_ID: u8 = 0xD0;
pub const REG_CTRL_MEAS: u8 = 0xF4;
pub const REG_OUT_MSB: u8 = 0xF6;

/// Fixed chip ID of every BMP180.
pub const CHIP_ID: u8 = 0x55;

// Control register values
pub const CMD_TEMPERATURE: u8 = 0x2E;
pub const CMD_PRESSURE: u8 = 0x34;

/// Highest oversampling setting (ultra high resolution, 8 internal samples).
pub const MAX_OVERSAMPLING: u8 = 3;

/// Temperature conversion time (datasheet max 4.5 ms).
pub const TEMPERATURE_SETTLE_MS: u32 = 5;
/// Pressure conversion wait.  Sized for the slowest setting (25.5 ms) with
/// margin and applied at every setting.
pub const PRESSURE_SETTLE_MS: u32 = 40;

/// Standard sea-level pressure used as the altitude reference.
pub const STD_SEA_LEVEL_HPA: f32 = 1013.25;

/// Per-device calibration words.  AC4..AC6 are unsigned; the rest signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationData {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl CalibrationData {
    /// Decode the big-endian EEPROM block starting at 0xAA.
    pub fn from_bytes(buf: &[u8; REG_CALIB_LENGTH]) -> Self {
        let s = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        let u = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Self {
            ac1: s(0),
            ac2: s(2),
            ac3: s(4),
            ac4: u(6),
            ac5: u(8),
            ac6: u(10),
            b1: s(12),
            b2: s(14),
            mb: s(16),
            mc: s(18),
            md: s(20),
        }
    }
}

/// Output of the integer compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compensated {
    /// True temperature in 0.1 °C.
    pub temperature_decidegc: i64,
    /// True pressure in Pa.
    pub pressure_pa: i64,
}

/// One barometer measurement in engineering units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarometerReading {
    pub pressure_hpa: f32,
    /// Die temperature; an intermediate of the pressure compensation.
    pub temperature_c: f32,
}

impl BarometerReading {
    /// Barometric altitude in metres, rounded to centimetres.
    pub fn altitude_m(&self, sea_level_hpa: f32) -> f32 {
        altitude_m(self.pressure_hpa, sea_level_hpa)
    }
}

/// International barometric formula.
pub fn altitude_m(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    let alt = 44330.0 * (1.0 - (pressure_hpa / sea_level_hpa).powf(1.0 / 5.255));
    (alt * 100.0).round() / 100.0
}

/// Run the vendor fixed-point compensation.
///
/// Every division truncates toward zero and every right shift is
/// arithmetic.  The `B7 < 0x8000_0000` split is part of the reference
/// procedure; the two arms do not agree under truncation for all inputs.
/// `oss` above [`MAX_OVERSAMPLING`] is treated as the maximum.
pub fn compensate(
    cal: &CalibrationData,
    ut: i64,
    up: i64,
    oss: u8,
) -> Result<Compensated, SensorError> {
    let ac1 = i64::from(cal.ac1);
    let ac2 = i64::from(cal.ac2);
    let ac3 = i64::from(cal.ac3);
    let ac4 = i64::from(cal.ac4);
    let ac5 = i64::from(cal.ac5);
    let ac6 = i64::from(cal.ac6);
    let b1 = i64::from(cal.b1);
    let b2 = i64::from(cal.b2);
    let mc = i64::from(cal.mc);
    let md = i64::from(cal.md);
    let oss = oss.min(MAX_OVERSAMPLING);

    // True temperature
    let x1 = ((ut - ac6) * ac5) >> 15;
    let x2 = (mc << 11)
        .checked_div(x1 + md)
        .ok_or(SensorError::Compensation)?;
    let b5 = x1 + x2;
    let temperature_decidegc = (b5 + 8) >> 4;

    // True pressure
    let b6 = b5 - 4000;
    let b6_sq = b6.wrapping_mul(b6) >> 12;
    let x1 = b2.wrapping_mul(b6_sq) >> 11;
    let x2 = ac2.wrapping_mul(b6) >> 11;
    let x3 = x1.wrapping_add(x2);
    let b3 = ((ac1.wrapping_mul(4).wrapping_add(x3) << oss) + 2) >> 2;
    let x1 = ac3.wrapping_mul(b6) >> 13;
    let x2 = b1.wrapping_mul(b6_sq) >> 16;
    let x3 = (x1.wrapping_add(x2) + 2) >> 2;
    let b4 = ac4.wrapping_mul(x3.wrapping_add(32768)) >> 15;
    let b7 = up.wrapping_sub(b3).wrapping_mul(50_000 >> oss);

    let p = if b7 < 0x8000_0000 {
        b7.wrapping_mul(2).checked_div(b4)
    } else {
        b7.checked_div(b4).map(|q| q.wrapping_mul(2))
    }
    .ok_or(SensorError::Compensation)?;

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = (-7357_i64).wrapping_mul(p) >> 16;
    let pressure_pa = p.wrapping_add((x1 + x2 + 3791) >> 4);

    Ok(Compensated {
        temperature_decidegc,
        pressure_pa,
    })
}

/// BMP180 on an I2C bus, with a delay source for the conversion waits.
pub struct Bmp180<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    oversampling: u8,
}

impl<I2C: I2c, D: DelayNs> Bmp180<I2C, D> {
    /// Driver at the fixed board address.  `oversampling` is clamped to 0..=3.
    pub fn new(i2c: I2C, delay: D, oversampling: u8) -> Self {
        Self {
            i2c,
            delay,
            addr: pins::BAROMETER_I2C_ADDR,
            oversampling: oversampling.min(MAX_OVERSAMPLING),
        }
    }

    pub fn oversampling(&self) -> u8 {
        self.oversampling
    }

    /// Read `(chip_id, chip_version)` from 0xD0..0xD1.
    pub fn read_id(&mut self) -> Result<(u8, u8), SensorError> {
        let mut buf = [0u8; 2];
        self.read_registers(REG_CHIP_ID, &mut buf)?;
        Ok((buf[0], buf[1]))
    }

    /// Fail unless the device at the bus address identifies as a BMP180.
    pub fn verify(&mut self) -> Result<(), SensorError> {
        let (id, _version) = self.read_id()?;
        if id == CHIP_ID {
            Ok(())
        } else {
            Err(SensorError::UnexpectedChipId(id))
        }
    }

    pub fn read_calibration(&mut self) -> Result<CalibrationData, SensorError> {
        let mut buf = [0u8; REG_CALIB_LENGTH];
        self.read_registers(REG_CALIB_START, &mut buf)?;
        Ok(CalibrationData::from_bytes(&buf))
    }

    /// Uncompensated temperature (16-bit).
    pub fn read_raw_temperature(&mut self) -> Result<i64, SensorError> {
        self.write_register(REG_CTRL_MEAS, CMD_TEMPERATURE)?;
        self.delay.delay_ms(TEMPERATURE_SETTLE_MS);
        let mut buf = [0u8; 2];
        self.read_registers(REG_OUT_MSB, &mut buf)?;
        Ok(i64::from(u16::from_be_bytes(buf)))
    }

    /// Uncompensated pressure (16..19-bit depending on oversampling).
    pub fn read_raw_pressure(&mut self) -> Result<i64, SensorError> {
        let oss = self.oversampling;
        self.write_register(REG_CTRL_MEAS, CMD_PRESSURE + (oss << 6))?;
        self.delay.delay_ms(PRESSURE_SETTLE_MS);
        let mut buf = [0u8; 3];
        self.read_registers(REG_OUT_MSB, &mut buf)?;
        let raw = (i64::from(buf[0]) << 16) | (i64::from(buf[1]) << 8) | i64::from(buf[2]);
        Ok(raw >> (8 - oss))
    }

    /// Full measurement: calibration block, UT, UP, compensation.
    ///
    /// Any bus error aborts the measurement; there is no retry.
    pub fn read(&mut self) -> Result<BarometerReading, SensorError> {
        let cal = self.read_calibration()?;
        let ut = self.read_raw_temperature()?;
        let up = self.read_raw_pressure()?;
        let out = compensate(&cal, ut, up, self.oversampling)?;
        Ok(BarometerReading {
            pressure_hpa: out.pressure_pa as f32 / 100.0,
            temperature_c: out.temperature_decidegc as f32 / 10.0,
        })
    }

    /// Give the bus and delay back (used on shutdown).
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c.write_read(self.addr, &[reg], buf).map_err(|e| {
            debug!("BMP180: read of 0x{:02X} failed: {:?}", reg, e);
            SensorError::Bus
        })
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c.write(self.addr, &[reg, value]).map_err(|e| {
            debug!("BMP180: write of 0x{:02X} failed: {:?}", reg, e);
            SensorError::Bus
        })
    }
}

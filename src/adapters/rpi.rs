//! Raspberry Pi bus adapter.
//!
//! Opens the hardware buses through `rppal`, whose `hal` feature makes them
//! `embedded-hal` implementations, so the drivers in [`crate::sensors`]
//! stay generic over the bus.  Each bus is opened once
//! at startup and owned by its driver for the life of the process.

use log::{error, info};
use rppal::hal::Delay;
use rppal::i2c::I2c;
use rppal::spi::{Bus, Mode, SimpleHalSpiDevice, SlaveSelect, Spi};

use crate::error::{Error, Result};
use crate::pins;

/// SPI device for the MCP3008 (CE0 on SPI0, mode 0).
pub type AdcSpi = SimpleHalSpiDevice;

/// Everything the sensor drivers need from the board.
pub struct PiBuses {
    pub adc_spi: AdcSpi,
    pub barometer_i2c: I2c,
    pub delay: Delay,
}

fn spi_bus(index: u8) -> Result<Bus> {
    match index {
        0 => Ok(Bus::Spi0),
        1 => Ok(Bus::Spi1),
        other => {
            error!("rpi: unsupported SPI bus {}", other);
            Err(Error::Init("unsupported SPI bus"))
        }
    }
}

fn slave_select(index: u8) -> Result<SlaveSelect> {
    match index {
        0 => Ok(SlaveSelect::Ss0),
        1 => Ok(SlaveSelect::Ss1),
        2 => Ok(SlaveSelect::Ss2),
        other => {
            error!("rpi: unsupported SPI chip select {}", other);
            Err(Error::Init("unsupported SPI chip select"))
        }
    }
}

/// Open SPI0/CE0 for the ADC and I2C-1 for the barometer.
///
/// The rppal error is logged here; callers only see [`Error::Init`].
pub fn open_buses() -> Result<PiBuses> {
    let spi = Spi::new(
        spi_bus(pins::ADC_SPI_BUS)?,
        slave_select(pins::ADC_SPI_CS)?,
        pins::ADC_SPI_CLOCK_HZ,
        Mode::Mode0,
    )
    .map_err(|e| {
        error!("rpi: SPI{}.{}: {}", pins::ADC_SPI_BUS, pins::ADC_SPI_CS, e);
        Error::Init("opening SPI bus for MCP3008")
    })?;
    info!(
        "SPI{}.{} open at {} Hz",
        pins::ADC_SPI_BUS,
        pins::ADC_SPI_CS,
        pins::ADC_SPI_CLOCK_HZ
    );

    let i2c = I2c::with_bus(pins::BAROMETER_I2C_BUS).map_err(|e| {
        error!("rpi: I2C-{}: {}", pins::BAROMETER_I2C_BUS, e);
        Error::Init("opening I2C bus for BMP180")
    })?;
    info!(
        "I2C-{} open, barometer at 0x{:02X}",
        pins::BAROMETER_I2C_BUS,
        pins::BAROMETER_I2C_ADDR
    );

    Ok(PiBuses {
        adc_spi: SimpleHalSpiDevice::new(spi),
        barometer_i2c: i2c,
        delay: Delay::new(),
    })
}

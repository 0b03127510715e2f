//! MCP3008 8-channel 10-bit ADC driver.
//!
//! Single-ended conversions over SPI mode 0.  Each read is one 3-byte
//! full-duplex transaction:
//!
//! ```text
//!  MOSI: 0000_0001  1ccc_0000  xxxx_xxxx     (start bit, SGL + channel)
//!  MISO: xxxx_xxxx  xxxx_x0BB  BBBB_BBBB     (null bit, B9..B0)
//! ```
//!
//! Only the low two bits of the second reply byte and the whole third byte
//! carry the sample; everything else is ignored.

use embedded_hal::spi::SpiDevice;
use log::debug;

use crate::error::SensorError;

/// Highest single-ended channel index.
pub const MAX_CHANNEL: u8 = 7;
/// Full-scale 10-bit sample.
pub const FULL_SCALE: u16 = 1023;

/// Build the request frame for a single-ended read on `channel`.
pub const fn request_frame(channel: u8) -> [u8; 3] {
    [0x01, (0x08 + channel) << 4, 0x00]
}

/// Extract the 10-bit sample from a reply frame.
pub const fn decode_sample(reply: [u8; 3]) -> u16 {
    (((reply[1] & 0x03) as u16) << 8) | reply[2] as u16
}

pub struct Mcp3008<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Sample `channel` (0..=7) and return the raw value in 0..=1023.
    pub fn read_channel(&mut self, channel: u8) -> Result<u16, SensorError> {
        if channel > MAX_CHANNEL {
            return Err(SensorError::InvalidChannel(channel));
        }
        let mut frame = request_frame(channel);
        self.spi.transfer_in_place(&mut frame).map_err(|e| {
            debug!("MCP3008: SPI transfer on channel {} failed: {:?}", channel, e);
            SensorError::Bus
        })?;
        Ok(decode_sample(frame))
    }

    /// Give the SPI device back (used on shutdown).
    pub fn release(self) -> SPI {
        self.spi
    }
}

//! Bus, channel and address assignments for the logger board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding bus numbers.  Change an assignment here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// MCP3008 10-bit ADC (SPI)
// ---------------------------------------------------------------------------

/// SPI bus the ADC is wired to (`/dev/spidev0.*`).
pub const ADC_SPI_BUS: u8 = 0;
/// Chip-select line of the ADC (`/dev/spidev*.0`).
pub const ADC_SPI_CS: u8 = 0;
/// SPI clock for the ADC (1 MHz, well inside the 3.6 MHz limit at 5 V).
pub const ADC_SPI_CLOCK_HZ: u32 = 1_000_000;

/// Capacitive soil moisture probe.
pub const SOIL_MOISTURE_CHANNEL: u8 = 0;
/// Light-dependent resistor divider.
pub const LIGHT_CHANNEL: u8 = 1;
/// Rain drop sensor board.
pub const RAIN_CHANNEL: u8 = 2;

// ---------------------------------------------------------------------------
// BMP180 barometer (I2C)
// ---------------------------------------------------------------------------

/// I2C bus the barometer is wired to (`/dev/i2c-1`).
pub const BAROMETER_I2C_BUS: u8 = 1;
/// Fixed 7-bit address of the BMP180.
pub const BAROMETER_I2C_ADDR: u8 = 0x77;

// ---------------------------------------------------------------------------
// DHT22 temperature / humidity
// ---------------------------------------------------------------------------

/// BCM GPIO of the DHT22 data line.  Bound by the `dht11` device-tree
/// overlay (`dtoverlay=dht11,gpiopin=26`), which exposes the sensor as an
/// IIO device; the logger never drives this pin itself.
pub const DHT_GPIO: u8 = 26;

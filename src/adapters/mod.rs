//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements        | Connects to                     |
//! |----------------|-------------------|---------------------------------|
//! | `config_file`  | ConfigPort        | JSON document on disk           |
//! | `csv_sink`     | RecordSink        | One CSV file per calendar day   |
//! | `iio_dht`      | HygrometerDriver  | Linux `dht11` IIO sysfs device  |
//! | `log_sink`     | EventSink         | `log` facade (env_logger)       |
//! | `rpi`          | (bus provider)    | rppal SPI0 / I2C-1 (`rpi` only) |
//! | `time`         | Clock             | Host local time                 |

pub mod config_file;
pub mod csv_sink;
pub mod iio_dht;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod time;
pub(super) mod utils;

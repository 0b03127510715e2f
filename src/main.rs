//! SensorLog: Main Entry Point
//!
//! Hexagonal layout with a single synchronous acquisition loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SensorHub         CsvDailySink   JsonConfigFile  SystemClock  │
//! │  (SensorPort)      (RecordSink)   (ConfigPort)    (Clock)      │
//! │  rppal SPI / I2C   IioHygrometer  LogEventSink                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          AcquisitionService (pure logic)               │    │
//! │  │  read · contain · validate · stamp                     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  shutdown flag (SIGINT / SIGTERM) · interruptible sleep        │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};

use sensorlog::adapters::config_file::{DEFAULT_CONFIG_PATH, JsonConfigFile};
use sensorlog::adapters::csv_sink::CsvDailySink;
use sensorlog::adapters::iio_dht::IioHygrometer;
use sensorlog::adapters::log_sink::LogEventSink;
use sensorlog::adapters::rpi;
use sensorlog::adapters::time::SystemClock;
use sensorlog::app::events::AppEvent;
use sensorlog::app::ports::{ConfigPort, EventSink};
use sensorlog::app::service::AcquisitionService;
use sensorlog::config::LoggerConfig;
use sensorlog::pins;
use sensorlog::sensors::SensorHub;
use sensorlog::sensors::bmp180::Bmp180;
use sensorlog::sensors::dht::DhtSensor;
use sensorlog::sensors::mcp3008::Mcp3008;
use sensorlog::shutdown;

fn main() -> ExitCode {
    // ── 1. Configuration (logger not up yet, report on stderr) ─
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let port = JsonConfigFile::new(&path);
    let config = match load_config(&port) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("sensorlog: {} ({})", e, port.path().display());
            return ExitCode::FAILURE;
        }
    };

    // ── 2. Logging ────────────────────────────────────────────
    init_logging(&config);

    info!("╔══════════════════════════════════════╗");
    info!("║  SensorLog v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Config loaded from {}", port.path().display());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(port: &JsonConfigFile) -> sensorlog::error::Result<LoggerConfig> {
    Ok(port.load()?)
}

fn init_logging(config: &LoggerConfig) {
    // validate() already accepted the level name.
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(config: &LoggerConfig) -> Result<()> {
    // ── 3. Buses and drivers ──────────────────────────────────
    let buses = rpi::open_buses().context("hardware init failed")?;

    let adc = Mcp3008::new(buses.adc_spi);
    let mut barometer = Bmp180::new(
        buses.barometer_i2c,
        buses.delay,
        config.barometer.oversampling,
    );
    barometer
        .verify()
        .context("BMP180 not responding as expected")?;
    info!("BMP180 detected, oversampling={}", barometer.oversampling());

    let hygrometer = IioHygrometer::new(&config.dht_device);
    info!(
        "DHT22 on GPIO{} via {}",
        pins::DHT_GPIO,
        hygrometer.device_dir().display()
    );
    let dht = DhtSensor::new(hygrometer);

    let mut sensors = SensorHub::new(adc, barometer, dht, config.calibration);

    // ── 4. Core + adapters ────────────────────────────────────
    let mut service = AcquisitionService::new(config);
    let mut sink = CsvDailySink::new(
        &config.data_folder,
        &config.file_extension,
        &config.timestamp_format,
    );
    let clock = SystemClock::new();
    let mut events = LogEventSink::new();

    // ── 5. Signals ────────────────────────────────────────────
    shutdown::install_signal_handler().context("installing signal handler")?;

    events.emit(&AppEvent::Started {
        interval_secs: config.log_interval,
    });

    // ── 6. Acquisition loop ───────────────────────────────────
    let interval = Duration::from_secs(config.log_interval);
    while !shutdown::requested() {
        service
            .log_cycle(&mut sensors, &clock, &mut sink, &mut events)
            .context("record sink failed, stopping")?;
        shutdown::sleep_interruptible(interval);
    }

    // ── 7. Orderly shutdown ───────────────────────────────────
    service
        .shutdown(&mut sink, &mut events)
        .context("closing record sink")?;
    drop(sensors);
    Ok(())
}

//! AcquisitionService writing through the real CSV sink across a day
//! boundary.

use std::fs;

use tempfile::TempDir;

use sensorlog::adapters::csv_sink::CsvDailySink;
use sensorlog::app::service::AcquisitionService;
use sensorlog::config::LoggerConfig;
use sensorlog::sensors::dht::DhtReading;

use crate::mock_hw::{FixedClock, MockSensors, RecordingEvents, at};

const HEADER: &str = "timestamp,temperature,humidity,soil_moisture,light_level,rain_level,pressure";

#[test]
fn records_split_at_midnight_with_one_header_each() {
    let dir = TempDir::new().unwrap();
    let cfg = LoggerConfig {
        data_folder: dir.path().to_path_buf(),
        ..LoggerConfig::default()
    };
    let mut svc = AcquisitionService::new(&cfg);
    let mut sensors = MockSensors::healthy();
    let clock = FixedClock::new(at(2024, 6, 1, 23, 59, 58));
    let mut sink = CsvDailySink::new(&cfg.data_folder, &cfg.file_extension, &cfg.timestamp_format);
    let mut events = RecordingEvents::default();

    svc.log_cycle(&mut sensors, &clock, &mut sink, &mut events)
        .unwrap();
    clock.set(at(2024, 6, 2, 0, 0, 2));
    svc.log_cycle(&mut sensors, &clock, &mut sink, &mut events)
        .unwrap();
    svc.shutdown(&mut sink, &mut events).unwrap();

    let day1 = fs::read_to_string(dir.path().join("2024-06-01.csv")).unwrap();
    let day2 = fs::read_to_string(dir.path().join("2024-06-02.csv")).unwrap();
    assert_eq!(
        day1.lines().collect::<Vec<_>>(),
        vec![
            HEADER,
            "2024-06-01 23:59:58,21.00,55.00,40.00,75.50,0.00,1008.50"
        ]
    );
    assert_eq!(
        day2.lines().collect::<Vec<_>>(),
        vec![
            HEADER,
            "2024-06-02 00:00:02,21.00,55.00,40.00,75.50,0.00,1008.50"
        ]
    );
}

#[test]
fn absent_values_are_empty_fields() {
    let dir = TempDir::new().unwrap();
    let cfg = LoggerConfig {
        data_folder: dir.path().to_path_buf(),
        file_extension: "log".to_owned(),
        ..LoggerConfig::default()
    };
    let mut svc = AcquisitionService::new(&cfg);
    let mut sensors = MockSensors {
        dht: DhtReading::default(),
        ..MockSensors::healthy()
    };
    let clock = FixedClock::new(at(2024, 6, 3, 8, 0, 0));
    let mut sink = CsvDailySink::new(&cfg.data_folder, &cfg.file_extension, &cfg.timestamp_format);
    let mut events = RecordingEvents::default();

    svc.log_cycle(&mut sensors, &clock, &mut sink, &mut events)
        .unwrap();
    svc.shutdown(&mut sink, &mut events).unwrap();

    let text = fs::read_to_string(dir.path().join("2024-06-03.log")).unwrap();
    assert_eq!(
        text.lines().nth(1),
        Some("2024-06-03 08:00:00,,,40.00,75.50,0.00,1008.50")
    );
}

#[test]
fn custom_timestamp_format_is_applied() {
    let dir = TempDir::new().unwrap();
    let cfg = LoggerConfig {
        data_folder: dir.path().to_path_buf(),
        timestamp_format: "%d/%m/%Y %H:%M".to_owned(),
        ..LoggerConfig::default()
    };
    let mut svc = AcquisitionService::new(&cfg);
    let mut sensors = MockSensors::healthy();
    let clock = FixedClock::new(at(2024, 6, 4, 17, 45, 10));
    let mut sink = CsvDailySink::new(&cfg.data_folder, &cfg.file_extension, &cfg.timestamp_format);
    let mut events = RecordingEvents::default();

    svc.log_cycle(&mut sensors, &clock, &mut sink, &mut events)
        .unwrap();
    drop(sink);

    let text = fs::read_to_string(dir.path().join("2024-06-04.csv")).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("04/06/2024 17:45,"));
}

//! SensorHub wired to the real MCP3008 / BMP180 / DHT drivers over mock
//! buses.

use sensorlog::app::ports::SensorPort;
use sensorlog::app::service::AcquisitionService;
use sensorlog::config::{CalibrationConfig, LoggerConfig};
use sensorlog::error::SensorError;
use sensorlog::sensors::SensorHub;
use sensorlog::sensors::bmp180::Bmp180;
use sensorlog::sensors::dht::DhtSensor;
use sensorlog::sensors::mcp3008::Mcp3008;

use crate::mock_hw::{
    FixedClock, MemorySink, MockDelay, MockHygrometer, MockI2c, MockSpi, RecordingEvents, at,
};

type Hub = SensorHub<MockSpi, MockI2c, MockDelay, MockHygrometer>;

fn hub(samples: [u16; 8], i2c: MockI2c, dht: MockHygrometer) -> Hub {
    SensorHub::new(
        Mcp3008::new(MockSpi::new(samples)),
        Bmp180::new(i2c, MockDelay::default(), 0),
        DhtSensor::new(dht),
        CalibrationConfig::default(),
    )
}

fn good_dht() -> MockHygrometer {
    MockHygrometer {
        temperature: Ok(22.4),
        humidity: Ok(61.0),
    }
}

#[test]
fn analog_channels_use_their_calibration() {
    // soil dry, light pitch dark (raw 0), rain soaked
    let mut h = hub([930, 0, 300, 0, 0, 0, 0, 0], MockI2c::datasheet(), good_dht());

    assert_eq!(h.read_soil_moisture(), Ok(0.0));
    assert_eq!(h.read_light(), Ok(100.0));
    assert_eq!(h.read_rain(), Ok(100.0));

    let frames = h.adc.release().frames;
    assert_eq!(
        frames,
        vec![[0x01, 0x80, 0x00], [0x01, 0x90, 0x00], [0x01, 0xA0, 0x00]]
    );
}

#[test]
fn analog_readings_saturate_outside_calibration() {
    // raw values beyond either endpoint clamp to it
    let mut wet = hub([100, 512, 1023, 0, 0, 0, 0, 0], MockI2c::datasheet(), good_dht());
    assert_eq!(wet.read_soil_moisture(), Ok(100.0));
    assert_eq!(wet.read_rain(), Ok(0.0));

    let mut dry = hub([1023, 0, 0, 0, 0, 0, 0, 0], MockI2c::datasheet(), good_dht());
    assert_eq!(dry.read_soil_moisture(), Ok(0.0));
}

#[test]
fn soil_midpoint_is_linear() {
    // (930 - 672.5) / (930 - 415) = 50 %; raw 673 lands just under
    let mut h = hub([673, 0, 0, 0, 0, 0, 0, 0], MockI2c::datasheet(), good_dht());
    let pct = h.read_soil_moisture().unwrap();
    assert!((pct - 49.9).abs() < 0.1, "pct = {pct}");
}

#[test]
fn spi_failure_is_a_bus_fault() {
    let mut h = hub([0; 8], MockI2c::datasheet(), good_dht());
    h.adc = {
        let mut spi = MockSpi::new([0; 8]);
        spi.fail = true;
        Mcp3008::new(spi)
    };
    assert_eq!(h.read_soil_moisture(), Err(SensorError::Bus));
    assert_eq!(h.read_light(), Err(SensorError::Bus));
    assert_eq!(h.read_rain(), Err(SensorError::Bus));
}

#[test]
fn barometer_reproduces_datasheet_example() {
    let mut h = hub([0; 8], MockI2c::datasheet(), good_dht());

    let reading = h.read_barometer().unwrap();
    assert!((reading.pressure_hpa - 699.64).abs() < 0.001);
    assert!((reading.temperature_c - 15.0).abs() < 0.001);

    let (i2c, delay) = h.barometer.release();
    assert!(i2c.addresses.iter().all(|&a| a == 0x77));
    // 5 ms temperature settle + 40 ms pressure settle
    assert_eq!(delay.total_ns, 45_000_000);
}

#[test]
fn barometer_bus_failure_is_a_bus_fault() {
    let mut i2c = MockI2c::datasheet();
    i2c.fail = true;
    let mut h = hub([0; 8], i2c, good_dht());
    assert_eq!(h.read_barometer(), Err(SensorError::Bus));
}

#[test]
fn chip_id_is_verified() {
    let mut bmp = Bmp180::new(MockI2c::datasheet(), MockDelay::default(), 3);
    assert_eq!(bmp.verify(), Ok(()));

    let mut other = MockI2c::datasheet();
    other.regs[0xD0] = 0x58;
    let mut bmp = Bmp180::new(other, MockDelay::default(), 3);
    assert_eq!(bmp.verify(), Err(SensorError::UnexpectedChipId(0x58)));
}

#[test]
fn highest_oversampling_decodes_nineteen_bit_pressure() {
    // UP values above 16 bits only appear with OSS > 0
    let i2c = MockI2c::bmp180(crate::mock_hw::DATASHEET_CALIBRATION, 27898, 23843 << 3);
    let mut bmp = Bmp180::new(i2c, MockDelay::default(), 3);
    assert_eq!(bmp.read_raw_pressure(), Ok(23843 << 3));
}

#[test]
fn hygrometer_fault_drops_both_values() {
    let dht = MockHygrometer {
        temperature: Ok(22.4),
        humidity: Err(SensorError::Driver),
    };
    let mut h = hub([0; 8], MockI2c::datasheet(), dht);
    let reading = h.read_temperature_humidity();
    assert_eq!(reading.temperature_c, None);
    assert_eq!(reading.humidity_pct, None);
}

#[test]
fn full_cycle_over_mock_buses() {
    let mut h = hub([930, 512, 1023, 0, 0, 0, 0, 0], MockI2c::datasheet(), good_dht());
    let mut svc = AcquisitionService::new(&LoggerConfig::default());
    let clock = FixedClock::new(at(2024, 6, 1, 6, 30, 0));
    let mut sink = MemorySink::default();
    let mut events = RecordingEvents::default();

    let record = svc
        .log_cycle(&mut h, &clock, &mut sink, &mut events)
        .unwrap();

    assert_eq!(record.present_count(), 6);
    assert_eq!(record.soil_moisture_pct, Some(0.0));
    assert_eq!(record.rain_pct, Some(0.0));
    assert_eq!(record.temperature_c, Some(22.4));
    assert_eq!(record.humidity_pct, Some(61.0));
    assert!((record.pressure_hpa.unwrap() - 699.64).abs() < 0.001);
}

//! One acquisition cycle's output.

use chrono::NaiveDateTime;
use core::fmt::{self, Write as _};

/// The six measured quantities, in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
    SoilMoisture,
    Light,
    Rain,
    Pressure,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Temperature,
        Field::Humidity,
        Field::SoilMoisture,
        Field::Light,
        Field::Rain,
        Field::Pressure,
    ];

    /// Column name in the log file header.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::SoilMoisture => "soil_moisture",
            Self::Light => "light_level",
            Self::Rain => "rain_level",
            Self::Pressure => "pressure",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "\u{00b0}C",
            Self::Pressure => "hPa",
            Self::Humidity | Self::SoilMoisture | Self::Light | Self::Rain => "%",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Header row of every daily file.
pub const HEADER: [&str; 7] = [
    "timestamp",
    "temperature",
    "humidity",
    "soil_moisture",
    "light_level",
    "rain_level",
    "pressure",
];

/// A timestamped set of readings.  `None` marks a sensor that failed this
/// cycle; no numeric sentinel is ever stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRecord {
    pub timestamp: NaiveDateTime,
    /// Air temperature (°C).
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f32>,
    /// Soil moisture (0–100 %).
    pub soil_moisture_pct: Option<f32>,
    /// Ambient light (0–100 %).
    pub light_pct: Option<f32>,
    /// Rain wetness (0–100 %).
    pub rain_pct: Option<f32>,
    /// Barometric pressure (hPa).
    pub pressure_hpa: Option<f32>,
}

impl SensorRecord {
    /// Empty record: every field absent.
    pub fn empty(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            temperature_c: None,
            humidity_pct: None,
            soil_moisture_pct: None,
            light_pct: None,
            rain_pct: None,
            pressure_hpa: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<f32> {
        match field {
            Field::Temperature => self.temperature_c,
            Field::Humidity => self.humidity_pct,
            Field::SoilMoisture => self.soil_moisture_pct,
            Field::Light => self.light_pct,
            Field::Rain => self.rain_pct,
            Field::Pressure => self.pressure_hpa,
        }
    }

    /// Number of fields that carry a value.
    pub fn present_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    /// Flat, header-ordered row.  Absent values render as empty fields.
    ///
    /// Fails when `timestamp_format` asks for something a naive timestamp
    /// cannot provide (an offset or zone name, for instance).
    pub fn to_row(&self, timestamp_format: &str) -> Result<[String; 7], fmt::Error> {
        let mut stamp = String::new();
        write!(stamp, "{}", self.timestamp.format(timestamp_format))?;
        let cell = |v: Option<f32>| v.map(|x| format!("{x:.2}")).unwrap_or_default();
        Ok([
            stamp,
            cell(self.temperature_c),
            cell(self.humidity_pct),
            cell(self.soil_moisture_pct),
            cell(self.light_pct),
            cell(self.rain_pct),
            cell(self.pressure_hpa),
        ])
    }
}

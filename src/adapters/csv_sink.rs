//! Daily CSV record sink.
//!
//! Implements [`RecordSink`] with one file per calendar day at
//! `<data_folder>/<YYYY-MM-DD>.<ext>`.  The header row is written only when
//! the day's file is created (or found empty), so restarting the logger
//! mid-day keeps appending to the same file.  Every row is flushed as soon
//! as it is written; an unclean shutdown loses at most the row in flight.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{error, info};

use crate::app::ports::RecordSink;
use crate::app::record::{HEADER, SensorRecord};
use crate::error::SinkError;

use super::utils::csv_line;

struct DailyFile {
    date: NaiveDate,
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Rotating, day-partitioned CSV writer.
pub struct CsvDailySink {
    folder: PathBuf,
    extension: String,
    timestamp_format: String,
    current: Option<DailyFile>,
}

impl CsvDailySink {
    /// `timestamp_format` must already have passed
    /// [`crate::config::validate_timestamp_format`].
    pub fn new(folder: impl Into<PathBuf>, extension: &str, timestamp_format: &str) -> Self {
        Self {
            folder: folder.into(),
            extension: extension.to_owned(),
            timestamp_format: timestamp_format.to_owned(),
            current: None,
        }
    }

    /// Path of the file that holds `date`'s records.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.folder
            .join(format!("{}.{}", date.format("%Y-%m-%d"), self.extension))
    }

    /// Path of the currently open file, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|f| f.path.as_path())
    }

    fn open(&self, date: NaiveDate) -> Result<DailyFile, SinkError> {
        fs::create_dir_all(&self.folder).map_err(|e| {
            error!("CsvDailySink: cannot create {}: {}", self.folder.display(), e);
            SinkError::Open
        })?;

        let path = self.path_for(date);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                error!("CsvDailySink: cannot open {}: {}", path.display(), e);
                SinkError::Open
            })?;
        let is_empty = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|e| {
                error!("CsvDailySink: cannot stat {}: {}", path.display(), e);
                SinkError::Open
            })?;

        let mut daily = DailyFile {
            date,
            path,
            writer: BufWriter::new(file),
        };
        if is_empty {
            write_line(&mut daily, &csv_line(&HEADER))?;
        }
        Ok(daily)
    }
}

fn write_line(file: &mut DailyFile, line: &str) -> Result<(), SinkError> {
    writeln!(file.writer, "{line}").map_err(|e| {
        error!("CsvDailySink: write to {} failed: {}", file.path.display(), e);
        SinkError::Write
    })?;
    file.writer.flush().map_err(|e| {
        error!("CsvDailySink: flush of {} failed: {}", file.path.display(), e);
        SinkError::Flush
    })
}

impl RecordSink for CsvDailySink {
    fn rotate_if_needed(&mut self, date: NaiveDate) -> Result<bool, SinkError> {
        if self.current.as_ref().is_some_and(|f| f.date == date) {
            return Ok(false);
        }
        self.close()?;
        let daily = self.open(date)?;
        info!("CsvDailySink: logging to {}", daily.path.display());
        self.current = Some(daily);
        Ok(true)
    }

    fn append(&mut self, record: &SensorRecord) -> Result<(), SinkError> {
        self.rotate_if_needed(record.timestamp.date())?;
        let row = record.to_row(&self.timestamp_format).map_err(|_| {
            error!(
                "CsvDailySink: cannot render timestamp with {:?}",
                self.timestamp_format
            );
            SinkError::Write
        })?;
        let line = csv_line(&row);
        match self.current.as_mut() {
            Some(file) => write_line(file, &line),
            None => Err(SinkError::Open),
        }
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut file) = self.current.take() {
            file.writer.flush().map_err(|e| {
                error!("CsvDailySink: flush of {} failed: {}", file.path.display(), e);
                SinkError::Flush
            })?;
        }
        Ok(())
    }
}

impl Drop for CsvDailySink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

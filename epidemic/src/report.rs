// report.rs - Per-generation census rows written as delimited text

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cell::Census;
use crate::error::ReportError;

pub const CENSUS_HEADER: [&str; 4] = ["time", "healthy", "infected", "dead"];

/// In-memory table flushed to disk once the runs are over.
#[derive(Debug, Clone)]
pub struct CsvReport {
    delimiter: String,
    columns: usize,
    output: String,
}

impl Default for CsvReport {
    fn default() -> Self {
        Self::new(",")
    }
}

impl CsvReport {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self { delimiter: delimiter.into(), columns: 0, output: String::new() }
    }

    /// Report with the census header already in place.
    pub fn census() -> Self {
        let mut report = Self::default();
        report.write_header(&CENSUS_HEADER);
        report
    }

    pub fn write_header<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.columns = columns.len();
        self.push_line(columns);
    }

    /// Appends a row; its width must match the header.
    pub fn write_row<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<(), ReportError> {
        if columns.len() != self.columns {
            return Err(ReportError::ColumnMismatch { expected: self.columns, actual: columns.len() });
        }
        self.push_line(columns);
        Ok(())
    }

    pub fn write_census(&mut self, day: u32, census: Census) -> Result<(), ReportError> {
        self.write_row(&[
            day.to_string(),
            census.healthy.to_string(),
            census.infected.to_string(),
            census.dead.to_string(),
        ])
    }

    fn push_line<S: AsRef<str>>(&mut self, columns: &[S]) {
        for (i, column) in columns.iter().enumerate() {
            if i != 0 {
                self.output.push_str(&self.delimiter);
            }
            self.output.push_str(column.as_ref());
        }
        self.output.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Appends another report's rows, skipping its header line.
    pub fn extend_rows(&mut self, other: &CsvReport) {
        let body = other.output.split_once('\n').map_or("", |(_, rest)| rest);
        self.output.push_str(body);
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let io_err = |source| ReportError::Io { path: path.to_path_buf(), source };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.output.as_bytes()).map_err(io_err)?;
        writer.flush().map_err(io_err)
    }
}

//! Incremental CSV output
//!
//! The sink is opened once per run (truncating any previous output) and
//! receives records one at a time. Each write is flushed before it returns,
//! so a crash mid-batch loses at most the record in flight.

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::lookup::{CSV_HEADER, CedulaRecord};

/// Error types for record persistence
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Durable destination for lookup records
pub trait RecordSink: Send {
    /// Persist one record; must not return before it is durable.
    fn write(&mut self, record: &CedulaRecord) -> Result<(), SinkError>;

    /// Human-readable location for the run summary.
    fn location(&self) -> String;
}

/// CSV file sink with a fixed 10-column header
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        let file = File::create(&path).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        // Header is written by hand so an empty run still produces it
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(CSV_HEADER)
            .map_err(|source| SinkError::Csv {
                path: path.clone(),
                source,
            })?;
        writer.flush().map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Opened CSV output at {}", path.display());
        Ok(Self { path, writer })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, record: &CedulaRecord) -> Result<(), SinkError> {
        self.writer
            .serialize(record)
            .map_err(|source| SinkError::Csv {
                path: self.path.clone(),
                source,
            })?;
        self.writer.flush().map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Identifier;

    #[test]
    fn test_header_written_on_create() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let _sink = CsvSink::create(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "CEDULA,NOMBRE,FECHA_NACIMIENTO,EDAD,SEXO,PROVINCIA,DISTRITO,CORREGIMIENTO,CENTRO_VOTACION,MESA\n"
        );
    }

    #[test]
    fn test_each_write_is_visible_immediately() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = CsvSink::create(&path).unwrap();

        let record = CedulaRecord {
            identifier: "1-1-1".into(),
            name: "PEREZ, JUAN".into(),
            ..CedulaRecord::default()
        };
        sink.write(&record).unwrap();

        // Sink still open: the row must already be on disk
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1-1-1,\"PEREZ, JUAN\",,,,,,,,");

        sink.write(&CedulaRecord::failure(&Identifier::parse("2-2-2").unwrap()))
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().last(), Some("2-2-2,ERROR - NO ENCONTRADO,,,,,,,,"));
    }

    #[test]
    fn test_create_truncates_previous_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale,row\nanother,row\n").unwrap();

        let _sink = CsvSink::create(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("CEDULA,"));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(matches!(CsvSink::create(&path), Err(SinkError::Io { .. })));
    }
}

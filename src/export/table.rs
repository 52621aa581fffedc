//! CSV reading and writing for data files.
//!
//! Headers are written explicitly so an empty result still produces a file
//! with its header row.

use std::fs::{self, File};
use std::io::{Read, Write};

use camino::Utf8Path;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::rows::TabularRow;
use crate::github::CollectError;

fn csv_error(source: &str, error: &csv::Error) -> CollectError {
    CollectError::Csv {
        path: source.to_owned(),
        message: error.to_string(),
    }
}

fn io_error(path: &Utf8Path, error: &std::io::Error) -> CollectError {
    CollectError::Io {
        message: format!("{path}: {error}"),
    }
}

/// Writes the header of `R` followed by `rows`.
///
/// `source` names the destination in error messages.
///
/// # Errors
///
/// Returns [`CollectError::Csv`] when serialisation or writing fails.
pub fn write_rows<W, R>(writer: W, rows: &[R], source: &str) -> Result<(), CollectError>
where
    W: Write,
    R: TabularRow + Serialize,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(R::HEADERS)
        .map_err(|error| csv_error(source, &error))?;
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|error| csv_error(source, &error))?;
    }
    csv_writer.flush().map_err(|error| CollectError::Csv {
        path: source.to_owned(),
        message: error.to_string(),
    })
}

/// Reads every row of a headed CSV stream.
///
/// # Errors
///
/// Returns [`CollectError::Csv`] when a row cannot be decoded.
pub fn read_rows<Rd, R>(reader: Rd, source: &str) -> Result<Vec<R>, CollectError>
where
    Rd: Read,
    R: DeserializeOwned,
{
    csv::Reader::from_reader(reader)
        .deserialize()
        .map(|row| row.map_err(|error| csv_error(source, &error)))
        .collect()
}

/// Creates or truncates `path` and writes `rows` to it, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns [`CollectError::Io`] when the file cannot be created and
/// [`CollectError::Csv`] when writing fails.
pub fn write_file<R>(path: &Utf8Path, rows: &[R]) -> Result<(), CollectError>
where
    R: TabularRow + Serialize,
{
    if let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| io_error(parent, &error))?;
    }
    let file = File::create(path).map_err(|error| io_error(path, &error))?;
    write_rows(file, rows, path.as_str())?;
    info!(%path, rows = rows.len(), "wrote data file");
    Ok(())
}

/// Reads all rows from `path`.
///
/// # Errors
///
/// Returns [`CollectError::MissingInput`] when `path` does not exist,
/// [`CollectError::Io`] when it cannot be opened, and [`CollectError::Csv`]
/// when a row cannot be decoded.
pub fn read_file<R>(path: &Utf8Path) -> Result<Vec<R>, CollectError>
where
    R: DeserializeOwned,
{
    if !path.is_file() {
        return Err(CollectError::MissingInput {
            path: path.to_string(),
        });
    }
    let file = File::open(path).map_err(|error| io_error(path, &error))?;
    read_rows(file, path.as_str())
}

//! Flat-file reading and writing.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::domain::Table;
use crate::error::DataError;

/// Read a whole file, mapping a missing file to `DataError::NotFound`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, DataError> {
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
        _ => DataError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Parse CSV bytes with a header row into a `Table`.
///
/// An empty input yields a table with no headers, which the cleaner rejects.
pub fn parse_table(bytes: &[u8]) -> Result<Table, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

/// Read a CSV file into a `Table`.
pub fn read_table(path: &Path) -> Result<Table, DataError> {
    let bytes = read_bytes(path)?;
    let table = parse_table(&bytes)?;
    debug!(
        path = %path.display(),
        columns = table.width(),
        rows = table.len(),
        "read table"
    );
    Ok(table)
}

/// Write a `Table` as CSV, header first. Overwrites an existing file.
pub fn write_table(path: &Path, table: &Table) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = table.len(), "wrote table");
    Ok(())
}

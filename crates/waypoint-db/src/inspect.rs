//! Read-only inspection of record files.
//!
//! Opens a record file without creating it and reports its tables and row
//! counts, so an operator can tell a healthy database from an empty
//! placeholder or a missing file.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use waypoint_common::{Error, Result};

/// A table and its current row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub rows: i64,
}

/// List user tables and row counts for the record file at `path`.
///
/// Returns `NotFound` if the file does not exist (a read-only open must
/// never create it) and `Database` if the file cannot be read as SQLite.
/// An existing file with no tables yields an empty list — that is the
/// zero-byte placeholder bootstrap leaves behind.
pub fn inspect(path: &Path) -> Result<Vec<TableInfo>> {
    if !path.exists() {
        return Err(Error::not_found(format!(
            "record file does not exist: {}",
            path.display()
        )));
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| Error::database(format!("Failed to open {}: {}", path.display(), e)))?;

    list_tables(&conn)
}

fn list_tables(conn: &Connection) -> Result<Vec<TableInfo>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(db_err)?;

    let names: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .map_err(db_err)?
        .collect::<std::result::Result<_, _>>()
        .map_err(db_err)?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let rows: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{}\"", name), [], |row| {
                row.get(0)
            })
            .map_err(db_err)?;
        tables.push(TableInfo { name, rows });
    }

    Ok(tables)
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::database(e.to_string())
}

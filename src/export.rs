use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::error::CollectError;

/// Serialize `rows` as CSV into any writer. The header comes from the row type's field names.
pub fn write_rows_to<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), CollectError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `rows` to `path` in one go, creating the parent directory when needed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), CollectError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_rows_to(file, rows)?;
    info!("CSV written");
    Ok(())
}

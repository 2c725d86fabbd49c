// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::{ATTENDANCE_TABLE, OPERATIONS_TABLE};
use crate::config::options::ExportOptions;
use crate::csv::{attendance_rows, operations_rows, to_table_string, ATTENDANCE_HEADERS, OPERATIONS_HEADERS};
use crate::model::{AttendanceMessage, OperationAttendance};
use crate::store;

/// Write both relational tables into `export.out_dir`.
/// Returns the paths written, operations first.
pub fn write_tables(
    export: &ExportOptions,
    ops: &[OperationAttendance],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    ensure_directory(&export.out_dir)?;
    let sep = export.format.delim();

    let ops_path = export.table_path(OPERATIONS_TABLE);
    write_table(&ops_path, &OPERATIONS_HEADERS, &operations_rows(ops), export.include_headers, sep)?;

    let att_path = export.table_path(ATTENDANCE_TABLE);
    write_table(&att_path, &ATTENDANCE_HEADERS, &attendance_rows(ops), export.include_headers, sep)?;

    Ok(vec![ops_path, att_path])
}

/// Create/truncate `path` and write one table into it.
pub fn write_table(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let contents = to_table_string(headers, rows, include_headers, sep);
    fs::write(path, contents)?;
    logd!("File: {} rows -> {}", rows.len(), path.display());
    Ok(())
}

/// Everything a `run` leaves behind: parsed JSON, both tables, and optionally the
/// preprocessed messages.
pub fn write_run_outputs(
    export: &ExportOptions,
    ops: &[OperationAttendance],
    processed: Option<&[AttendanceMessage]>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    ensure_directory(&export.out_dir)?;
    let mut written = Vec::with_capacity(4);

    let parsed = export.parsed_path();
    store::save_operations_json(&parsed, ops)?;
    written.push(parsed);

    written.extend(write_tables(export, ops)?);

    if let Some(msgs) = processed {
        let path = export.processed_path();
        store::save_messages_json(&path, msgs)?;
        written.push(path);
    }
    Ok(written)
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

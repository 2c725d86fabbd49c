// src/csv.rs
// Relational export of parsed ops: one `operations` table and one `attendance` table.
use std::io::{self, Write};
use std::mem::take;

use crate::model::OperationAttendance;

pub const OPERATIONS_HEADERS: [&str; 2] = ["date", "attendance_count"];
pub const ATTENDANCE_HEADERS: [&str; 4] = ["id", "operation_date", "user", "role"];

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Used to read exported tables back.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Ops → rows ---------------- */

/// `(date, attendance_count)`, one row per op.
pub fn operations_rows(ops: &[OperationAttendance]) -> Vec<Vec<String>> {
    ops.iter()
        .map(|op| vec![op.op_date.to_string(), op.user_count().to_string()])
        .collect()
}

/// `(id, operation_date, user, role)`, one row per listed member.
/// `id` counts from 1 across the whole export; role is prefixed with the squad name.
pub fn attendance_rows(ops: &[OperationAttendance]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(ops.iter().map(|o| o.user_count()).sum());
    for op in ops {
        let date = op.op_date.to_string();
        for squad in &op.attendance {
            for member in &squad.members {
                let role = match &member.role {
                    Some(r) => join!(&squad.squad, " ", r),
                    None => squad.squad.clone(),
                };
                rows.push(vec![(rows.len() + 1).to_string(), date.clone(), member.user.clone(), role]);
            }
        }
    }
    rows
}

/// Render one table to a string, optionally with its header row.
pub fn to_table_string(
    headers: &[&str],
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, headers, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

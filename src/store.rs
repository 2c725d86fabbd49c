// src/store.rs
// JSON on disk: the raw history in, processed messages and parsed ops out.
use std::{fs, io::{self, BufWriter, Write}, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::options::ReactionMap;
use crate::error::{AttendanceError, Result};
use crate::history::parse_history;
use crate::model::{AttendanceMessage, OperationAttendance};

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> AttendanceError + '_ {
    move |source| AttendanceError::Io { path: path.to_path_buf(), source }
}

/// Read an exported channel history and turn it into messages.
pub fn load_history(path: &Path, reactions: &ReactionMap) -> Result<Vec<AttendanceMessage>> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    let msgs = parse_history(&text, reactions)?;
    logd!("Store: {} messages from {}", msgs.len(), path.display());
    Ok(msgs)
}

/// Dump of the preprocessed message list, mostly for eyeballing what the splitter did.
pub fn save_messages_json(path: &Path, msgs: &[AttendanceMessage]) -> Result<()> {
    write_pretty(path, msgs)
}

pub fn load_messages_json(path: &Path) -> Result<Vec<AttendanceMessage>> {
    read_json(path)
}

pub fn save_operations_json(path: &Path, ops: &[OperationAttendance]) -> Result<()> {
    write_pretty(path, ops)
}

pub fn load_operations_json(path: &Path) -> Result<Vec<OperationAttendance>> {
    read_json(path)
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
    }
    let file = fs::File::create(path).map_err(io_err(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n").map_err(io_err(path))?;
    writer.flush().map_err(io_err(path))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    Ok(serde_json::from_str(&text)?)
}

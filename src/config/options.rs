// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::model::AttendanceFlag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub input: PathBuf,
    pub run: RunOptions,
    pub export: ExportOptions,
    pub reactions: ReactionMap,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_HISTORY_FILE),
            run: RunOptions::default(),
            export: ExportOptions::default(),
            reactions: ReactionMap::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Parse op groups on this many threads. 1 = inline.
    pub workers: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { workers: WORKERS }
    }
}

impl RunOptions {
    pub fn set_workers(&mut self, n: usize) {
        self.workers = n.clamp(1, MAX_WORKERS);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
    /// Also write the preprocessed message list next to the results.
    pub dump_processed: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
            dump_processed: false,
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<table>.<ext>`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.out_dir.join(join!(table, ".", self.format.ext()))
    }

    pub fn parsed_path(&self) -> PathBuf {
        self.out_dir.join(PARSED_FILE)
    }

    pub fn processed_path(&self) -> PathBuf {
        self.out_dir.join(PROCESSED_FILE)
    }

    pub fn set_out_dir(&mut self, dir: impl AsRef<Path>) {
        self.out_dir = dir.as_ref().to_path_buf();
    }
}

/// Which reaction emoji stands for which flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionMap {
    pub bad: String,
    pub good: String,
    pub op_delimiter: String,
}

impl Default for ReactionMap {
    fn default() -> Self {
        Self {
            bad: s!(EMOJI_BAD),
            good: s!(EMOJI_GOOD),
            op_delimiter: s!(EMOJI_OP_DELIMITER),
        }
    }
}

impl ReactionMap {
    pub fn flag_for(&self, emoji: &str) -> Option<AttendanceFlag> {
        let e = emoji.trim();
        if e == self.bad { Some(AttendanceFlag::Bad) }
        else if e == self.good { Some(AttendanceFlag::Good) }
        else if e == self.op_delimiter { Some(AttendanceFlag::OpDelimiter) }
        else { None }
    }
}

// src/progress.rs
use chrono::NaiveDate;

use crate::parse::LineRejection;

/// Something an operator should look at after a run: a line that produced no squad,
/// or a whole op group that could not be dated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Line {
        kind: LineRejection,
        op_date: NaiveDate,
        author: String,
        text: String,
    },
    Undated {
        /// Index of the group in segmentation order
        group: usize,
        messages: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Line { kind: LineRejection::NoMatch, op_date, author, text } => {
                write!(f, "Bad squad match on {op_date} by {author}. Message: '{text}'")
            }
            Diagnostic::Line { kind: LineRejection::BadFlag, op_date, author, text } => {
                write!(f, "Skipping BAD-flagged message on {op_date} by {author}. Message: '{text}'")
            }
            Diagnostic::Undated { group, messages } => {
                write!(f, "Dropping op group #{group}: all {messages} messages are BAD-flagged, no date")
            }
        }
    }
}

/// Status and diagnostics sink for a pipeline run.
/// Frontends implement this to surface what was dropped and why.
pub trait Progress {
    /// Called once segmentation is done, with the number of op groups.
    fn begin(&mut self, _groups: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A line or group was dropped.
    fn diagnostic(&mut self, _d: &Diagnostic) {}

    /// One op was assembled.
    fn op_done(&mut self, _op_date: NaiveDate, _squads: usize) {}

    /// Called at the end.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Keeps every diagnostic it is handed.
#[derive(Default, Debug)]
pub struct CollectProgress {
    pub groups: usize,
    pub ops: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub finished: bool,
}

impl Progress for CollectProgress {
    fn begin(&mut self, groups: usize) { self.groups = groups; }
    fn diagnostic(&mut self, d: &Diagnostic) { self.diagnostics.push(d.clone()); }
    fn op_done(&mut self, _op_date: NaiveDate, _squads: usize) { self.ops += 1; }
    fn finish(&mut self) { self.finished = true; }
}

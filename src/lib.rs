// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod history;
pub mod model;
pub mod parse;
pub mod preprocess;
pub mod progress;
pub mod runner;
pub mod segment;
pub mod store;

pub use error::{AttendanceError, Result};
pub use model::{AttendanceFlag, AttendanceMessage, OperationAttendance, SquadAttendance, SquadMember};
pub use runner::{extract, run, Report};

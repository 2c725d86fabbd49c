// src/core/mod.rs

pub mod sanitize;
pub mod scan;

pub use scan::Cursor;

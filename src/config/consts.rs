// src/config/consts.rs

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_FILE: &str = "attendance.conf";

// Input: channel history as exported by the Discord fetcher
pub const DEFAULT_HISTORY_FILE: &str = "attendance.json";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const PROCESSED_FILE: &str = "processed_attendance.json";
pub const PARSED_FILE: &str = "parsed_attendance.json";
pub const OPERATIONS_TABLE: &str = "operations";
pub const ATTENDANCE_TABLE: &str = "attendance";

// Reaction emoji the channel moderators use for corrections
pub const EMOJI_BAD: &str = "❌";
pub const EMOJI_GOOD: &str = "✅";
pub const EMOJI_OP_DELIMITER: &str = "🆕";

// Concurrency
pub const WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 16;

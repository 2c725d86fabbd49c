// src/preprocess.rs
// Split multi-line posts into one message per line, then strip decorative markdown.
// Pure: no I/O beyond a debug log line.

use crate::core::sanitize::strip_decoration;
use crate::model::AttendanceMessage;

/// Full preprocessing pass: newline split, then decoration stripping.
pub fn preprocess(messages: &[AttendanceMessage]) -> Vec<AttendanceMessage> {
    let out: Vec<AttendanceMessage> = split_newlines(messages)
        .iter()
        .map(clean_decoration)
        .collect();
    logd!("Preprocess: {} msgs input, processed into {}", messages.len(), out.len());
    out
}

/// The text before the first line break always becomes a message, even when empty, so a
/// flagged post never vanishes. Later lines become messages unless empty.
/// Single-line messages pass through as-is.
pub fn split_newlines(messages: &[AttendanceMessage]) -> Vec<AttendanceMessage> {
    let mut out = Vec::with_capacity(messages.len());
    for msg in messages {
        if !msg.message.contains('\n') {
            out.push(msg.clone());
            continue;
        }
        let mut lines = msg.message.lines();
        out.push(msg.fragment(lines.next().unwrap_or("")));
        // Repeated newlines leave empty lines
        out.extend(lines.filter(|line| !line.is_empty()).map(|line| msg.fragment(line)));
    }
    out
}

/// Strip `*` decoration. Does not touch `is_split`.
pub fn clean_decoration(msg: &AttendanceMessage) -> AttendanceMessage {
    msg.retext(strip_decoration(&msg.message))
}

// src/segment.rs
//! Cut the time-ordered message stream into one group per operation.
//!
//! Two passes, composed in order:
//! 1. [`split_by_separator`]: posted separator lines (`-----`, `=====`, `...`) bound ops and are
//!    themselves dropped.
//! 2. [`split_by_flag`]: inside each of those groups, a message flagged
//!    [`AttendanceFlag::OpDelimiter`] opens a new op whose separator was never posted. Unlike a
//!    separator, the flagged message is kept as the op's first line.
//!
//! Empty groups are legal output (a separator at index 0, a flag on a group's first message).
//! Callers filter them.

use std::ops::Range;

use crate::model::{sort_by_timestamp, AttendanceFlag, AttendanceMessage};

/// Characters a separator line may repeat.
pub const SEPARATOR_CHARS: [char; 5] = ['-', '=', ':', '.', '+'];
/// Minimum run length for a separator line.
pub const SEPARATOR_MIN_LEN: usize = 3;

pub type OpGroup = Vec<AttendanceMessage>;

/// Sort, then both passes.
pub fn segment(messages: Vec<AttendanceMessage>) -> Vec<OpGroup> {
    let sorted = sort_by_timestamp(messages);
    let groups = split_by_flag(split_by_separator(sorted));
    logd!("Segment: {} op groups", groups.len());
    groups
}

/// Whole (trimmed) text is one separator char repeated 3+ times.
pub fn is_separator(text: &str) -> bool {
    let t = text.trim();
    let mut chars = t.chars();
    let Some(first) = chars.next() else { return false };
    SEPARATOR_CHARS.contains(&first)
        && chars.all(|c| c == first)
        && t.chars().count() >= SEPARATOR_MIN_LEN
}

/// Index ranges of the ops bounded by separator lines, separators excluded.
pub fn separator_ranges(messages: &[AttendanceMessage]) -> Vec<Range<usize>> {
    let seps: Vec<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, m)| is_separator(&m.message))
        .map(|(i, _)| i)
        .collect();

    let (Some(&first), Some(&last)) = (seps.first(), seps.last()) else {
        return vec![0..messages.len()];
    };

    let mut ranges = Vec::with_capacity(seps.len() + 1);
    ranges.push(0..first);
    // Back-to-back separators leave nothing in between: no op for that gap
    ranges.extend(
        seps.windows(2)
            .filter(|w| w[1] - w[0] > 1)
            .map(|w| w[0] + 1..w[1]),
    );
    ranges.push(last + 1..messages.len());
    ranges
}

/// First pass: group by separator lines.
pub fn split_by_separator(sorted: Vec<AttendanceMessage>) -> Vec<OpGroup> {
    let ranges = separator_ranges(&sorted);
    ranges.into_iter().map(|r| sorted[r].to_vec()).collect()
}

/// Sub-ranges of one group, cut at every `OP_DELIMITER`-flagged position.
///
/// With flags at `f1 < … < fk` the bounds are `[0, f1, …, fk, len]`, giving exactly `k + 1`
/// ranges. The last flagged message always opens the final range, which runs to the end.
pub fn flag_ranges(group: &[AttendanceMessage]) -> Vec<Range<usize>> {
    let mut bounds = vec![0];
    bounds.extend(
        group
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_flag(AttendanceFlag::OpDelimiter))
            .map(|(i, _)| i),
    );
    bounds.push(group.len());
    bounds.windows(2).map(|w| w[0]..w[1]).collect()
}

/// Second pass: re-split every group at flagged messages.
pub fn split_by_flag(groups: Vec<OpGroup>) -> Vec<OpGroup> {
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let ranges = flag_ranges(&group);
        if ranges.len() == 1 {
            out.push(group);
            continue;
        }
        logd!("Segment: flag-split group of {} into {}", group.len(), ranges.len());
        out.extend(ranges.into_iter().map(|r| group[r].to_vec()));
    }
    out
}

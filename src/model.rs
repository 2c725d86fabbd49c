// src/model.rs
//! In-memory shapes for one archived `#attendance` line and for the parsed results.
//!
//! Messages are values: every preprocessing stage builds a new [`AttendanceMessage`] from its
//! parent via [`AttendanceMessage::fragment`] or [`AttendanceMessage::retext`], and nothing
//! downstream of the loader mutates one in place.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Manual correction attached to a message through a reaction emoji.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceFlag {
    /// Confirmed as a real attendance line. Informational only.
    Good,
    /// Not attendance (banter, questions, corrections). Never parsed.
    Bad,
    /// First line of a new op whose separator message was never posted.
    OpDelimiter,
}

/// A set, so stacking the same reaction twice is the same as once.
pub type Flags = BTreeSet<AttendanceFlag>;

/// One archived chat line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMessage {
    pub id: u64,
    pub author_display: String,
    pub author_id: u64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flags: Flags,
    /// Synthetic fragment of a multi-line original.
    #[serde(default)]
    pub is_split: bool,
}

impl AttendanceMessage {
    /// Same author/time/flags, new text, marked as split off its parent.
    pub fn fragment(&self, text: impl Into<String>) -> Self {
        Self { message: text.into(), is_split: true, ..self.clone() }
    }

    /// Same everything but the text; `is_split` is carried over untouched.
    pub fn retext(&self, text: impl Into<String>) -> Self {
        Self { message: text.into(), ..self.clone() }
    }

    #[inline]
    pub fn has_flag(&self, flag: AttendanceFlag) -> bool {
        self.flags.contains(&flag)
    }

    #[inline]
    pub fn is_bad(&self) -> bool {
        self.has_flag(AttendanceFlag::Bad)
    }

    /// Calendar day the message was posted on (UTC).
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Stable sort by creation time; messages posted at the same instant keep their input order.
pub fn sort_by_timestamp(mut msgs: Vec<AttendanceMessage>) -> Vec<AttendanceMessage> {
    msgs.sort_by_key(|m| m.created_at);
    msgs
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadMember {
    pub user: String,
    /// Free text such as "L" or "FAC".
    pub role: Option<String>,
}

impl SquadMember {
    pub fn new(user: impl Into<String>, role: Option<&str>) -> Self {
        Self { user: user.into(), role: role.map(str::to_string) }
    }
}

/// One squad's line in one op. Members keep source order, duplicates included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadAttendance {
    pub squad: String,
    pub members: Vec<SquadMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationAttendance {
    pub op_date: NaiveDate,
    pub attendance: Vec<SquadAttendance>,
}

impl OperationAttendance {
    /// Everyone listed for the op, Zeus and moderators included.
    pub fn user_count(&self) -> usize {
        self.attendance.iter().map(|s| s.members.len()).sum()
    }

    pub fn squad_count(&self) -> usize {
        self.attendance.len()
    }
}

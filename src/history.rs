// src/history.rs
//! Raw channel history as exported from Discord, and its conversion into
//! [`AttendanceMessage`]s.
//!
//! A record may carry its flags already derived (`flags`), the reactions it received
//! (`reactions`), or both; the two are merged. Snowflake IDs are accepted as JSON numbers or as
//! numeric strings, since exporters disagree on which to emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::config::options::ReactionMap;
use crate::error::{AttendanceError, Result};
use crate::model::{AttendanceMessage, Flags};

/// One reaction as seen on a message: which emoji, and how many people used it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 { 1 }

#[derive(Clone, Debug, Deserialize)]
pub struct RawMessage {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    pub author_display: String,
    #[serde(deserialize_with = "snowflake")]
    pub author_id: u64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub is_split: bool,
}

impl RawMessage {
    pub fn into_message(self, reactions: &ReactionMap) -> AttendanceMessage {
        let mut flags = self.flags;
        flags.extend(flags_from_reactions(&self.reactions, reactions));
        AttendanceMessage {
            id: self.id,
            author_display: self.author_display,
            author_id: self.author_id,
            message: self.message,
            created_at: self.created_at,
            edited_at: self.edited_at,
            flags,
            is_split: self.is_split,
        }
    }
}

/// Reactions → flags. Unknown emoji are ignored; repeats collapse.
pub fn flags_from_reactions(reactions: &[Reaction], map: &ReactionMap) -> Flags {
    reactions
        .iter()
        .filter(|r| r.count > 0)
        .filter_map(|r| map.flag_for(&r.emoji))
        .collect()
}

/// Parse a JSON array of raw records. Any malformed record fails the whole load,
/// naming its position in the array.
pub fn parse_history(json: &str, reactions: &ReactionMap) -> Result<Vec<AttendanceMessage>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<RawMessage>(value)
                .map(|raw| raw.into_message(reactions))
                .map_err(|source| AttendanceError::InvalidRecord { index, source })
        })
        .collect()
}

fn snowflake<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(u64),
        Text(String),
    }
    match Id::deserialize(de)? {
        Id::Num(n) => Ok(n),
        Id::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

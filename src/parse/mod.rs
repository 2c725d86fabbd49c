// src/parse/mod.rs
//! # Line parsing
//!
//! Turns one preprocessed `#attendance` line into a [`SquadAttendance`], or says why not.
//!
//! The grammar is split in two layers, each a small hand-written scanner over
//! [`crate::core::Cursor`]:
//! - [`squad`]: the whole-line shape `NAME SEP ROSTER`, matched against the full text.
//! - [`roster`]: the member list inside `ROSTER`, scanned left to right.
//!
//! Rejections are expected: the channel is free text and people chat in it. Nothing here
//! panics or errors on bad input; the caller turns a [`LineRejection`] into a diagnostic.

pub mod roster;
pub mod squad;

use chrono::NaiveDate;

use crate::error::{AttendanceError, Result};
use crate::model::{AttendanceMessage, SquadAttendance};

pub use roster::parse_roster;
pub use squad::{match_squad_line, SquadLine};

/// Why a line produced no squad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRejection {
    /// Manually marked as not attendance.
    BadFlag,
    /// Text does not have the `squad: roster` shape.
    NoMatch,
}

/// Parse one line, without any op context.
pub fn parse_line(msg: &AttendanceMessage) -> std::result::Result<SquadAttendance, LineRejection> {
    if msg.is_bad() {
        return Err(LineRejection::BadFlag);
    }
    let line = match_squad_line(&msg.message).ok_or(LineRejection::NoMatch)?;
    Ok(SquadAttendance {
        squad: s!(line.squad),
        members: parse_roster(line.roster),
    })
}

/// The op was held on the day of its first message not flagged BAD.
pub fn get_op_date(op_messages: &[AttendanceMessage]) -> Result<NaiveDate> {
    op_messages
        .iter()
        .find(|m| !m.is_bad())
        .map(AttendanceMessage::day)
        .ok_or(AttendanceError::UndatedOperation { messages: op_messages.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{flagged, msg};
    use crate::model::{AttendanceFlag, SquadMember};

    #[test]
    fn parse_line_round_trip() {
        let got = parse_line(&msg(1, 0, "Alpha: Bob(L), Carl")).unwrap();
        assert_eq!(
            got,
            SquadAttendance {
                squad: s!("Alpha"),
                members: vec![SquadMember::new("Bob", Some("L")), SquadMember::new("Carl", None)],
            }
        );
    }

    #[test]
    fn bad_flag_wins_over_valid_text() {
        let m = flagged(msg(1, 0, "Alpha: Bob(L), Carl"), AttendanceFlag::Bad);
        assert_eq!(parse_line(&m), Err(LineRejection::BadFlag));
    }

    #[test]
    fn free_text_is_rejected_not_fatal() {
        assert_eq!(parse_line(&msg(1, 0, "gg wp everyone")), Err(LineRejection::NoMatch));
    }

    #[test]
    fn junk_roster_gives_empty_squad() {
        let got = parse_line(&msg(1, 0, "Alpha: ,")).unwrap();
        assert_eq!(got.squad, "Alpha");
        assert!(got.members.is_empty());
    }

    #[test]
    fn op_date_skips_bad_messages() {
        let early_bad = flagged(msg(1, -60 * 24, "chatter"), AttendanceFlag::Bad);
        let good = msg(2, 0, "A: x");
        let date = get_op_date(&[early_bad, good]).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 5, 21).unwrap());
    }

    #[test]
    fn op_date_errors_when_all_bad() {
        let all_bad = vec![
            flagged(msg(1, 0, "x"), AttendanceFlag::Bad),
            flagged(msg(2, 1, "y"), AttendanceFlag::Bad),
        ];
        let err = get_op_date(&all_bad).unwrap_err();
        assert!(matches!(err, AttendanceError::UndatedOperation { messages: 2 }));
        assert!(get_op_date(&[]).is_err());
    }
}

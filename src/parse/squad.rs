// src/parse/squad.rs
// Squad-line grammar:
//
//   ws* NAME ws* SEP ws* ROSTER ws*
//
//   NAME   = [A-Za-z0-9-/ ]+      shortest candidate first
//   SEP    = ':' | '-' | ';'
//   ROSTER = [A-Za-z0-9(),;.&/ ]+ the whole remainder, unparsed here
//
// '-' is both a name char and a separator, so "HQ-1: Bob" only matches once the
// name has grown to "HQ-1". Growing the name one char at a time keeps that explicit.

use crate::core::Cursor;

/// A line split into its two halves, borrowed from the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquadLine<'a> {
    pub squad: &'a str,
    pub roster: &'a str,
}

#[inline]
pub fn is_squad_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | ' ')
}

#[inline]
pub fn is_name_separator(c: char) -> bool {
    matches!(c, ':' | '-' | ';')
}

#[inline]
pub fn is_roster_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | ',' | ';' | '.' | '&' | '/' | ' ')
}

/// Match the whole line or nothing.
pub fn match_squad_line(text: &str) -> Option<SquadLine<'_>> {
    let mut name = Cursor::new(text);
    name.skip_ws();
    let name_start = name.pos();

    loop {
        // Every candidate name is one char longer than the last
        let ch = name.bump()?;
        if !is_squad_char(ch) {
            return None;
        }
        let name_end = name.pos();

        let mut after = name;
        after.skip_ws();
        match after.bump() {
            Some(sep) if is_name_separator(sep) => {}
            _ => continue,
        }
        if let Some(roster) = roster_tail(after.rest()) {
            return Some(SquadLine { squad: &text[name_start..name_end], roster });
        }
    }
}

/// `ws* ROSTER ws*` over the rest of the line. Returns the trimmed roster blob.
fn roster_tail(tail: &str) -> Option<&str> {
    let core = tail.trim();
    if core.is_empty() {
        // A lone space still satisfies ROSTER+; nothing in it to parse though
        return tail.contains(' ').then_some(core);
    }
    core.chars().all(is_roster_char).then_some(core)
}

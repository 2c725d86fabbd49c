// src/parse/roster.rs
// Roster blob → members. One member is:
//
//   ws* USER ws* ( '(' ROLE ')' )? ws* ','?
//
//   USER = [A-Za-z0-9. ]+
//   ROLE = [A-Za-z0-9, /]+
//
// Applied left to right, non-overlapping. Anything that cannot start a member
// ('&', ';', '/', a stray paren) is skipped one char at a time.

use crate::core::{sanitize::preview, Cursor};
use crate::model::SquadMember;

#[inline]
fn is_user_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ' ')
}

#[inline]
fn is_role_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | ' ' | '/')
}

/// "Bob(L), Carl" → [("Bob", "L"), ("Carl", None)]
pub fn parse_roster(blob: &str) -> Vec<SquadMember> {
    let mut c = Cursor::new(blob);
    let mut members = Vec::new();

    while !c.is_eof() {
        c.skip_ws();
        let user = c.eat_while(is_user_char).trim();
        c.skip_ws();
        let role = parse_role(&mut c);

        if user.is_empty() {
            match role {
                Some(r) => logd!("Roster: role '({r})' with no name in '{}'", preview(blob, 60)),
                None => { c.bump(); }
            }
            continue;
        }

        c.skip_ws();
        c.eat(',');
        members.push(SquadMember { user: s!(user), role });
    }
    members
}

/// `(ROLE)` with the parens stripped. Leaves the cursor alone when there is no closed role.
fn parse_role(c: &mut Cursor<'_>) -> Option<String> {
    let mut probe = *c;
    if !probe.eat('(') {
        return None;
    }
    let inner = probe.eat_while(is_role_char);
    if inner.is_empty() || !probe.eat(')') {
        return None;
    }
    *c = probe;
    let role = inner.trim();
    (!role.is_empty()).then(|| s!(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(blob: &str) -> Vec<(String, Option<String>)> {
        parse_roster(blob).into_iter().map(|m| (m.user, m.role)).collect()
    }

    fn p(user: &str, role: Option<&str>) -> (String, Option<String>) {
        (s!(user), role.map(str::to_string))
    }

    #[test]
    fn names_and_roles() {
        assert_eq!(pairs("Bob(L), Carl"), vec![p("Bob", Some("L")), p("Carl", None)]);
    }

    #[test]
    fn space_before_role_and_trailing_space_trimmed() {
        assert_eq!(
            pairs("Schmitt (L), Lietuvis, Tao"),
            vec![p("Schmitt", Some("L")), p("Lietuvis", None), p("Tao", None)]
        );
    }

    #[test]
    fn period_keeps_name_together() {
        assert_eq!(
            pairs("Pixy(L), Walla, Rajan. Demonaki"),
            vec![p("Pixy", Some("L")), p("Walla", None), p("Rajan. Demonaki", None)]
        );
    }

    #[test]
    fn ampersand_and_semicolon_split_members() {
        assert_eq!(pairs("Bob & Carl; Dan"), vec![p("Bob", None), p("Carl", None), p("Dan", None)]);
    }

    #[test]
    fn role_with_comma_and_slash() {
        assert_eq!(pairs("Goose(L, FAC/JTAC)"), vec![p("Goose", Some("L, FAC/JTAC"))]);
    }

    #[test]
    fn unclosed_role_falls_back_to_names() {
        assert_eq!(pairs("Bob(L"), vec![p("Bob", None), p("L", None)]);
    }

    #[test]
    fn duplicates_kept_in_order() {
        assert_eq!(pairs("Bob, Bob"), vec![p("Bob", None), p("Bob", None)]);
    }

    #[test]
    fn empty_and_junk_only_blobs() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster(" , ; ").is_empty());
    }

    #[test]
    fn role_without_name_is_dropped_not_promoted() {
        assert!(parse_roster("(L)").is_empty());
        assert_eq!(pairs("Bob, (L), Carl"), vec![p("Bob", None), p("Carl", None)]);
        assert_eq!(pairs(" (FAC) Dan"), vec![p("Dan", None)]);
    }
}

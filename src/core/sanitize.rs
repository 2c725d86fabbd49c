// src/core/sanitize.rs

/// Markdown emphasis users wrap their lines in (`**A1: Toll(L)**`).
const DECORATION: char = '*';

/// Trim, drop every `*`, trim again.
pub fn strip_decoration(s: &str) -> String {
    s.trim().replace(DECORATION, "").trim().to_string()
}

/// Collapse whitespace runs to one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Short single-line preview for log lines.
pub fn preview(s: &str, max: usize) -> String {
    let flat = normalize_ws(s);
    if flat.chars().count() <= max { return flat; }
    let mut out: String = flat.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_and_italics() {
        assert_eq!(strip_decoration("**Alpha: Bob(L)**"), "Alpha: Bob(L)");
        assert_eq!(strip_decoration("  *B1*: Venom  "), "B1: Venom");
        assert_eq!(strip_decoration("** Alpha: Bob **"), "Alpha: Bob");
    }

    #[test]
    fn strip_is_idempotent() {
        let once = strip_decoration(" ***HQ*: Goose* ");
        assert_eq!(strip_decoration(&once), once);
    }

    #[test]
    fn preview_truncates_and_flattens() {
        assert_eq!(preview("a\n  b", 10), "a b");
        assert_eq!(preview("abcdefgh", 3), "abc…");
    }
}

// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}

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

/// Course part of a coursys slug: `"CMPT 225 D100"` -> `"cmpt-225"`.
/// The outline name ends with a space and the 4-character section code.
pub fn course_slug(name: &str) -> String {
    let name = name.trim();
    let base = match name.char_indices().rev().nth(4) {
        Some((i, _)) => &name[..i],
        None => "",
    };
    base.trim().to_lowercase().replace(' ', "-")
}

/// Section part of a coursys slug: `"D100"` -> `"d1"`, `"D102"` -> `"d102"`.
pub fn section_slug(section: &str) -> String {
    let s = section.trim().to_lowercase();
    if s.contains("00") {
        s.chars().take(2).collect()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_follow_coursys_urls() {
        assert_eq!(course_slug("CMPT 225 D100"), "cmpt-225");
        assert_eq!(course_slug("CMPT 105W D100"), "cmpt-105w");
        assert_eq!(course_slug("D100"), "");
        assert_eq!(section_slug("D100"), "d1");
        assert_eq!(section_slug("E100"), "e1");
        assert_eq!(section_slug("D102"), "d102");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
        assert_eq!(normalize_entities("a&nbsp;&amp;&nbsp;b"), "a & b");
    }
}

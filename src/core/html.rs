// src/core/html.rs
// Tolerant, case-insensitive tag scanning. No DOM; callers slice known blocks.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Next `<o ...> ... c` block at or after `from`, as byte offsets `(start, end)`.
/// Not nesting-aware: the first closing tag wins.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Inner text of the first `<tag ... id="id">` element.
pub fn element_by_id_ci<'a>(s: &'a str, tag: &str, id: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open_pat = format!("<{}", to_lower(tag));
    let close_pat = format!("</{}>", to_lower(tag));
    let id_dq = format!(r#"id="{}""#, to_lower(id));
    let id_sq = format!("id='{}'", to_lower(id));

    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&open_pat) {
        let start = pos + rel;
        let open_end = lc[start..].find('>')? + start;
        let opener = &lc[start..open_end];
        if opener.contains(&id_dq) || opener.contains(&id_sq) {
            let inner_start = open_end + 1;
            let close = lc[inner_start..].find(&close_pat)? + inner_start;
            return Some(&s[inner_start..close]);
        }
        pos = open_end;
    }
    None
}

/// The `n`th (0-based) `<tag>...</tag>` block within `s`.
pub fn nth_tag_block_ci<'a>(s: &'a str, tag: &str, n: usize) -> Option<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut pos = 0usize;
    let mut i = 0usize;
    while let Some((bs, be)) = next_tag_block_ci(s, &open, &close, pos) {
        // `<th` also matches `<thead`; skip anything that is not exactly the tag.
        let after = s.as_bytes().get(bs + open.len()).copied();
        let exact = matches!(after, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/'));
        if exact {
            if i == n {
                return Some(&s[bs..be]);
            }
            i += 1;
        }
        pos = if exact { be } else { bs + open.len() };
    }
    None
}

/// Cells of a `<tr>` block in document order, `<th>` and `<td>` alike, as plain text.
pub fn row_cells(tr: &str) -> Vec<String> {
    let lc = to_lower(tr);
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let td = lc[pos..].find("<td").map(|p| (p + pos, "</td>"));
        let th = lc[pos..].find("<th").map(|p| (p + pos, "</th>"));
        let (start, close) = match (td, th) {
            (Some(a), Some(b)) => if a.0 < b.0 { a } else { b },
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => break,
        };
        let Some(open_end) = tr[start..].find('>').map(|e| e + start + 1) else { break };
        let Some(end) = lc[open_end..].find(close).map(|e| e + open_end) else { break };
        out.push(strip_tags(super::sanitize::normalize_entities(&tr[open_end..end])));
        pos = end + close.len();
    }
    out
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

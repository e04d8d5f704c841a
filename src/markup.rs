// src/markup.rs
//! Minimal HTML table extraction, tailored to the kworb chart pages.
//!
//! The pages are static server-rendered tables, so cached regexes over the
//! raw markup are enough; no DOM is built. Cell text goes through entity
//! decoding and whitespace collapsing before any parsing happens.

use once_cell::sync::OnceCell;
use regex::Regex;

fn re_tr() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap())
}

fn re_td() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)<t[dh][^>]*>(.*?)</t[dh]>").unwrap())
}

fn re_tags() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap())
}

fn re_ws() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Inner markup of every `<tr>` in document order.
pub fn table_rows(html: &str) -> Vec<&str> {
    re_tr()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Text of every `<td>`/`<th>` cell in one row, cleaned via [`clean_text`].
pub fn row_cells(row_html: &str) -> Vec<String> {
    re_td()
        .captures_iter(row_html)
        .filter_map(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .collect()
}

/// Decode HTML entities, drop nested tags, collapse whitespace, trim.
pub fn clean_text(s: &str) -> String {
    let out = html_escape::decode_html_entities(s).to_string();
    let out = re_tags().replace_all(&out, "").to_string();
    let out = re_ws().replace_all(&out, " ").to_string();
    out.trim().to_string()
}

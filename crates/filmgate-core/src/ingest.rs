//! Feed-caption parsing.
//!
//! Feed posts carry a content code somewhere in their caption, written as
//! `film` followed by digits in any case. Extraction normalizes the match
//! to lowercase; a post with no code is dropped by the ingestor, never
//! queued or retried.

use std::sync::OnceLock;

use regex::Regex;

fn code_regex() -> &'static Regex {
    static CODE_RE: OnceLock<Regex> = OnceLock::new();
    CODE_RE.get_or_init(|| Regex::new(r"(?i)film\d+").expect("invalid content-code pattern"))
}

/// Extracts a content code from a caption.
///
/// Matches `film` + digits case-insensitively anywhere in the text and
/// returns the match lowercased. Returns `None` when the caption carries
/// no code.
pub fn extract_code(caption: &str) -> Option<String> {
    code_regex().find(caption).map(|m| m.as_str().to_lowercase())
}

/// Derives a display title from a caption.
///
/// The first line when the caption is multi-line, the caption verbatim when
/// single-line, and the code itself when the caption is empty.
pub fn derive_title(caption: &str, code: &str) -> String {
    if caption.is_empty() {
        return code.to_string();
    }
    match caption.split_once('\n') {
        Some((first_line, _)) => first_line.to_string(),
        None => caption.to_string(),
    }
}

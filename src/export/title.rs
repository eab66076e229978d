//! Title hint to filename stem.

use std::sync::OnceLock;

use regex::Regex;

/// Stem used when the hint has no usable characters.
pub const DEFAULT_TITLE: &str = "document";

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn hostile() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid regex"))
}

/// Turn a free-form title hint into a filename stem.
///
/// Whitespace runs become `_` and path-hostile characters are removed. An
/// empty result falls back to [`DEFAULT_TITLE`].
pub fn sanitize_title(hint: &str) -> String {
    // Whitespace first: tabs and newlines are also in the hostile class.
    let joined = whitespace().replace_all(hint.trim(), "_");
    let cleaned = hostile().replace_all(&joined, "");
    let stem = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    if stem.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        stem.to_string()
    }
}

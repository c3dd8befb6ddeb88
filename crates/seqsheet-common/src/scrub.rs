use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z\-_]+").expect("valid scrub pattern"));

/// Canonicalize a sample or project name for demultiplexer compatibility.
///
/// Every run of characters outside `[0-9A-Za-z-_]` collapses to a single
/// underscore. Applying the function twice is the same as applying it once.
pub fn scrub_name(name: &str) -> String {
    DISALLOWED.replace_all(name, "_").into_owned()
}

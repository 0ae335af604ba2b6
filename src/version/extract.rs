//! Version candidate extraction from link targets

use std::sync::LazyLock;

use regex::Regex;

/// One or more digits followed by at least one `.digits` group.
///
/// ASCII digits only, so every match is accepted by [`Version::parse`]
/// unless a component overflows `u64`.
///
/// [`Version::parse`]: crate::version::Version::parse
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)+").expect("version pattern is valid"));

/// Returns the first dotted numeric run in `text`, or `None` when the text
/// carries no version-like substring.
///
/// The earliest match wins, not the longest or the last one. A link such as
/// `/builds/1.2/Python-3.12.0.tgz` therefore yields `1.2`.
pub fn extract(text: &str) -> Option<&str> {
    VERSION_PATTERN.find(text).map(|m| m.as_str())
}

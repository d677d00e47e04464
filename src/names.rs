use regex::Regex;
use std::sync::LazyLock;

// Couple-name lines carry exactly two person names, but managers space them
// inconsistently. Real data examples:
//   김철수 이영희       → (김철수, 이영희)
//   홍 길동동           → (홍, 길동동)
//   홍길동 동           → (홍길동, 동)
//   홍길 동동           → (홍길, 동동)
//   홍 길동 동          → (홍, 길동 동)
//
// Word-shape alternatives are tried in a fixed priority order: 1+2, 2+1,
// 1+1, 2+2. The first anchored match wins; anything else (a single token,
// five or more tokens) is not a couple line.
static RE_TWO_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(\S+)\s+(\S+\s+\S+)|(\S+\s+\S+)\s+(\S+)|(\S+)\s+(\S+)|(\S+\s+\S+)\s+(\S+\s+\S+))\s*$",
    )
    .unwrap()
});

/// Split a string holding two person names into (first, second).
/// Returns `None` when the string does not resolve to exactly two names.
pub fn split_two_names(s: &str) -> Option<(String, String)> {
    let caps = RE_TWO_NAMES.captures(s)?;
    let first = caps
        .get(1)
        .or_else(|| caps.get(3))
        .or_else(|| caps.get(5))
        .or_else(|| caps.get(7))?;
    let second = caps
        .get(2)
        .or_else(|| caps.get(4))
        .or_else(|| caps.get(6))
        .or_else(|| caps.get(8))?;
    Some((first.as_str().to_string(), second.as_str().to_string()))
}

//! Cell parsing helpers.

/// Parses a positive integer cell. Returns `None` for zero, negatives,
/// decimals and text.
///
/// # Examples
///
/// ```
/// use allocforge_core::ingest::parse_positive;
///
/// assert_eq!(parse_positive(" 3 "), Some(3));
/// assert_eq!(parse_positive("0"), None);
/// assert_eq!(parse_positive("2.5"), None);
/// ```
pub fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

/// Splits a list cell into trimmed, non-empty items.
///
/// Accepts `a,b`, `a;b` and JSON-style `["a", "b"]` or `[1,2]`.
///
/// # Examples
///
/// ```
/// use allocforge_core::ingest::parse_list;
///
/// assert_eq!(parse_list("Java, SQL"), vec!["Java", "SQL"]);
/// assert_eq!(parse_list("[1,2, 3]"), vec!["1", "2", "3"]);
/// assert_eq!(parse_list(r#"["ml"; "go"]"#), vec!["ml", "go"]);
/// assert!(parse_list(" [ ] ").is_empty());
/// ```
pub fn parse_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split([',', ';'])
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

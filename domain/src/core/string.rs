//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending an ellipsis
/// when anything was cut. Counts characters, not bytes, so multi-byte text
/// is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_index, _)) => format!("{}...", &s[..byte_index]),
    }
}

/// Length of the longest run of `ch` anywhere in `s`.
pub fn longest_run(s: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Number of leading `ch` characters in `s`.
pub fn leading_run(s: &str, ch: char) -> usize {
    s.chars().take_while(|c| *c == ch).count()
}

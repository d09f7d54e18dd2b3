//! Character-level classification used by the amount scanner.

/// Characters that continue a word for boundary checks: ASCII letters,
/// ASCII digits and `_`. Matches the classic `\b` definition, so a number
/// followed by `円` or `€` still ends at a boundary.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Magnitude suffix letter → power-of-ten exponent (k, m, b, t; either case).
pub fn magnitude_exponent(c: char) -> Option<u32> {
    match c.to_ascii_lowercase() {
        'k' => Some(3),
        'm' => Some(6),
        'b' => Some(9),
        't' => Some(12),
        _ => None,
    }
}

/// True at `pos` when the text there is not glued to a preceding word
/// character. `pos` must be a char boundary.
pub fn word_starts_at(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().map_or(true, |c| !is_word_char(c))
}

/// True at `pos` when nothing word-like follows. `pos` must be a char boundary.
pub fn word_ends_at(text: &str, pos: usize) -> bool {
    text[pos..].chars().next().map_or(true, |c| !is_word_char(c))
}

/// Byte length of the leading ASCII-digit run of `s`.
pub fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Byte length of the leading whitespace of `s`.
pub fn whitespace_run(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

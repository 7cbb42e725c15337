// Character-level predicates and whitespace handling shared by the segmenter,
// the log previews, and the tests that rebuild a script from its sections.

/// True when the text has at least one cased character and none of them is
/// lower-case. Digits, punctuation and whitespace are ignored.
pub fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Collapse every whitespace run (newlines included, `\r\n` as one break) into
/// a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_whitespace_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer, reusing its allocation
pub fn normalize_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    if buffer.ends_with(' ') {
        buffer.pop();
    }
}

/// One-line excerpt of a block for log fields, cut at `max_chars` characters
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = normalize_whitespace(text);
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

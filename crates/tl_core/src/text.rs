/// Returned in place of blank input.
pub const EMPTY_INPUT_SENTINEL: &str = "No content to summarize.";

const ALLOWED_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '-'];

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Cleans raw user text before validation.
///
/// Characters outside the allow-set are dropped first, then whitespace runs
/// collapse to a single space and the ends are trimmed. The output never
/// contains a double space, so `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let filtered: String = text.chars().filter(|&c| is_allowed(c)).collect();
    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        EMPTY_INPUT_SENTINEL.to_string()
    } else {
        collapsed
    }
}

/// Whitespace-delimited token count, shared by input and summary metrics.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

use crate::error::ValidationError;
use crate::text::{char_count, word_count};
use crate::types::TextStats;

pub const MIN_WORDS: usize = 50;
pub const MAX_WORDS: usize = 4000;
pub const MAX_CHARS: usize = 10_000;

/// Outcome of checking normalized text against the input bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid(TextStats),
    Rejected {
        reason: ValidationError,
        stats: TextStats,
    },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn stats(&self) -> TextStats {
        match self {
            Self::Valid(stats) | Self::Rejected { stats, .. } => *stats,
        }
    }

    pub fn word_count(&self) -> usize {
        self.stats().word_count
    }

    pub fn char_count(&self) -> usize {
        self.stats().char_count
    }

    /// Empty when the input was accepted.
    pub fn error_message(&self) -> String {
        match self {
            Self::Valid(_) => String::new(),
            Self::Rejected { reason, .. } => reason.to_string(),
        }
    }

    pub fn into_result(self) -> Result<TextStats, ValidationError> {
        match self {
            Self::Valid(stats) => Ok(stats),
            Self::Rejected { reason, .. } => Err(reason),
        }
    }
}

/// Checks already-normalized text. Bounds are evaluated in order: too few
/// words, too many words, too many characters.
pub fn validate(text: &str) -> Validation {
    let stats = TextStats {
        word_count: word_count(text),
        char_count: char_count(text),
    };

    let reason = if stats.word_count < MIN_WORDS {
        Some(ValidationError::TooShort)
    } else if stats.word_count > MAX_WORDS {
        Some(ValidationError::TooLong)
    } else if stats.char_count > MAX_CHARS {
        Some(ValidationError::TooLarge)
    } else {
        None
    };

    match reason {
        Some(reason) => Validation::Rejected { reason, stats },
        None => Validation::Valid(stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    fn words(n: usize, word: &str) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_accepts_in_range() {
        for n in [50, 51, 500, 1999] {
            let validation = validate(&words(n, "word"));
            assert!(validation.is_valid(), "{} words should be valid", n);
            assert_eq!(validation.word_count(), n);
            assert!(validation.error_message().is_empty());
        }
    }

    #[test]
    fn test_rejects_below_minimum() {
        let validation = validate(&words(49, "word"));
        assert_eq!(
            validation,
            Validation::Rejected {
                reason: ValidationError::TooShort,
                stats: TextStats { word_count: 49, char_count: 49 * 5 - 1 },
            }
        );
        assert!(validation.error_message().contains("too short"));
    }

    #[test]
    fn test_rejects_above_maximum_words() {
        let validation = validate(&words(4001, "a"));
        assert_eq!(validation.into_result(), Err(ValidationError::TooLong));
        assert!(validation.error_message().contains("too long"));
    }

    #[test]
    fn test_max_words_with_short_tokens_is_accepted() {
        // 4000 one-letter words fit in 7999 characters.
        let validation = validate(&words(4000, "a"));
        assert!(validation.is_valid());
        assert_eq!(validation.char_count(), 7999);
    }

    #[test]
    fn test_rejects_above_character_limit() {
        // 1000 words of 10 letters is 10999 characters.
        let validation = validate(&words(1000, "abcdefghij"));
        assert_eq!(validation.into_result(), Err(ValidationError::TooLarge));
        assert!(validation.error_message().contains("token limit"));
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_character_limit_boundary() {
        // 909 ten-letter words take 9998 characters.
        let base = words(909, "abcdefghij");
        let at_limit = format!("{} {}", base, "x".repeat(MAX_CHARS - base.len() - 1));
        assert_eq!(char_count(&at_limit), MAX_CHARS);
        assert!(validate(&at_limit).is_valid());

        let over_limit = format!("{}y", at_limit);
        assert_eq!(char_count(&over_limit), MAX_CHARS + 1);
        assert_eq!(validate(&over_limit).into_result(), Err(ValidationError::TooLarge));
    }

    #[test]
    fn test_word_count_checked_before_char_count() {
        let validation = validate(&words(10, &"x".repeat(2000)));
        assert_eq!(validation.into_result(), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_sentinel_is_rejected_as_too_short() {
        let validation = validate(&normalize("   "));
        assert_eq!(validation.into_result(), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_repeated_word_scenario() {
        let text = normalize(&"test ".repeat(60));
        let validation = validate(&text);
        assert!(validation.is_valid());
        assert_eq!(validation.word_count(), 60);
        assert_eq!(validation.char_count(), 299);
    }
}

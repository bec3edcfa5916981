/// Content validation for post bodies.
///
/// The character policy lives in `ContentPolicy` as data (code-point ranges
/// and a separator whitelist) so product policy can evolve without touching
/// the checking algorithm. Validation is pure and side-effect-free.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character and length policy for post content.
///
/// Lengths are counted in Unicode code points, not bytes, so a four-byte
/// emoji costs one character, same as it renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPolicy {
    /// Maximum content length in code points.
    pub max_chars: usize,
    /// Inclusive code-point ranges admitted by the policy.
    pub allowed_ranges: Vec<(u32, u32)>,
    /// Individual code points admitted outside the ranges: joiners,
    /// variation selectors and keycap bases that emoji sequences need.
    pub separators: Vec<char>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            max_chars: 280,
            allowed_ranges: vec![
                (0x1F1E6, 0x1F1FF), // regional indicators (flags)
                (0x1F300, 0x1F5FF), // symbols and pictographs
                (0x1F600, 0x1F64F), // emoticons
                (0x1F680, 0x1F6FF), // transport and map symbols
                (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
                (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
                (0x2600, 0x26FF),   // miscellaneous symbols
                (0x2700, 0x27BF),   // dingbats
                (0x2B00, 0x2BFF),   // arrows and stars
            ],
            separators: vec![' ', '\u{200D}', '\u{FE0F}', '\u{20E3}', '#', '*'],
        }
    }
}

/// Why a candidate post body was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content must not be empty")]
    EmptyContent,

    #[error("content is {length} characters, maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("character {ch:?} at position {index} is not allowed")]
    DisallowedCharacter { ch: char, index: usize },
}

/// Post content that has passed `ContentPolicy::validate`. The write path
/// only accepts this type, so an unvalidated string cannot become a `Post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContent(String);

impl ValidatedContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ContentPolicy {
    /// Check a raw post body against the policy.
    ///
    /// The input is trimmed first; the emptiness and length checks apply to
    /// the trimmed value, which is also what the returned content carries.
    pub fn validate(&self, raw: &str) -> Result<ValidatedContent, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let length = trimmed.chars().count();
        if length > self.max_chars {
            return Err(ValidationError::TooLong {
                length,
                max: self.max_chars,
            });
        }

        for (index, ch) in trimmed.chars().enumerate() {
            if !self.is_allowed(ch) {
                return Err(ValidationError::DisallowedCharacter { ch, index });
            }
        }

        Ok(ValidatedContent(trimmed.to_owned()))
    }

    fn is_allowed(&self, ch: char) -> bool {
        if ch.is_ascii_digit() || self.separators.contains(&ch) {
            return true;
        }
        let cp = ch as u32;
        self.allowed_ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
    }
}

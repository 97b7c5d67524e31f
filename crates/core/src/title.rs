//! Page title parsing and normalization.
//!
//! Titles arrive as free text from URLs and event payloads. They are stored in
//! the host's page index in *db-key* form: spaces become underscores and the
//! first character is upper-cased. Prefix rollups match on that form too.

use crate::error::CoreError;

/// Maximum length of a db-key title, in bytes.
pub const MAX_TITLE_BYTES: usize = 255;

/// Characters that can never appear in a title.
const ILLEGAL_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

/// A validated, normalized page title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageTitle {
    db_key: String,
}

impl PageTitle {
    /// Parse user-supplied text into a title.
    ///
    /// Returns [`CoreError::InvalidTitle`] for empty or over-long input and for
    /// input containing illegal or control characters.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '_');
        if trimmed.is_empty() {
            return Err(CoreError::InvalidTitle("Title must not be empty".into()));
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| ILLEGAL_CHARS.contains(c) || c.is_control())
        {
            return Err(CoreError::InvalidTitle(format!(
                "Title contains illegal character {bad:?}"
            )));
        }

        let db_key = uppercase_first(&collapse_separators(trimmed));
        if db_key.len() > MAX_TITLE_BYTES {
            return Err(CoreError::InvalidTitle(format!(
                "Title must be at most {MAX_TITLE_BYTES} bytes"
            )));
        }

        Ok(Self { db_key })
    }

    /// The underscore form stored in the page index.
    pub fn db_key(&self) -> &str {
        &self.db_key
    }

    /// The human-readable form, with spaces.
    pub fn text(&self) -> String {
        self.db_key.replace('_', " ")
    }

    /// A `LIKE` pattern matching every title that starts with this one.
    pub fn like_prefix_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.db_key.len() + 1);
        for c in self.db_key.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

impl std::fmt::Display for PageTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

/// Replace every run of spaces and underscores with a single underscore.
fn collapse_separators(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_sep = false;
    for c in text.chars() {
        if c == ' ' || c == '_' {
            if !prev_sep {
                result.push('_');
            }
            prev_sep = true;
        } else {
            result.push(c);
            prev_sep = false;
        }
    }
    result
}

fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Quote record and the built-in default list.
//!
//! A `Quote` has no identifier beyond its `text`; sync merging uses the text as a
//! natural key.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `{text, category}` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body; also the key used to detect conflicts.
    #[serde(default)]
    pub text: String,
    /// Free-form category label.
    #[serde(default)]
    pub category: String,
}

impl Quote {
    /// Creates a quote from any string-like values.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Returns `true` when either field is empty.
    pub fn is_incomplete(&self) -> bool {
        self.text.is_empty() || self.category.is_empty()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - Category: {}", self.text, self.category)
    }
}

/// The list used whenever storage holds no readable quotes.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The greatest glory in living lies not in never falling, but in rising every time we fall.",
            "Inspiration",
        ),
        Quote::new("Life is what happens when you're busy making other plans.", "Life"),
        Quote::new("The purpose of our lives is to be happy.", "Happiness"),
        Quote::new("Get busy living or get busy dying.", "Motivation"),
        Quote::new(
            "You have within you right now, everything you need to deal with whatever the world can throw at you.",
            "Courage",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_quote_line() {
        let quote = Quote::new("Stay hungry.", "Life");
        assert_eq!(quote.to_string(), "\"Stay hungry.\" - Category: Life");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let quote: Quote = serde_json::from_str(r#"{"text":"Only text"}"#).unwrap();
        assert_eq!(quote.category, "");
        assert!(quote.is_incomplete());
    }

    #[test]
    fn defaults_have_five_distinct_categories() {
        let quotes = default_quotes();
        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[3].category, "Motivation");
    }
}

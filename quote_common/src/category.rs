//! Category set derivation and the category filter choice.
use std::fmt;

use crate::quote::Quote;

/// Option value meaning "no category restriction".
pub const ALL: &str = "all";

/// Selection in the category filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every quote qualifies.
    #[default]
    All,
    /// Only quotes whose category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parses an option value; `"all"` maps to [`CategoryFilter::All`].
    pub fn from_value(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    /// Option value stored in the selection control and in storage.
    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(category) => category,
        }
    }

    /// Returns `true` when `quote` passes the filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &quote.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&option_label(self.value()))
    }
}

/// Distinct categories in order of first appearance.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for quote in quotes {
        if !seen.contains(&quote.category) {
            seen.push(quote.category.clone());
        }
    }
    seen
}

/// Options for the filter control: `all` first, then every derived category.
pub fn filter_options(quotes: &[Quote]) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(categories(quotes).into_iter().map(CategoryFilter::Only))
        .collect()
}

/// Display label of an option value: first character upper-cased.
pub fn option_label(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

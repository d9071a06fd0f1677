//! Filter traits and types

use std::fmt;
use std::str::FromStr;

/// Output field a filter pipeline is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterContext {
    /// Document title
    Title,
    /// Document snippet
    Summary,
    /// Document URL
    Url,
    /// Document number label
    No,
    /// Rendered search form
    Form,
    /// Rendered paging navigation
    Nav,
}

impl FilterContext {
    pub const ALL: [FilterContext; 6] = [
        FilterContext::Title,
        FilterContext::Summary,
        FilterContext::Url,
        FilterContext::No,
        FilterContext::Form,
        FilterContext::Nav,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterContext::Title => "title",
            FilterContext::Summary => "summary",
            FilterContext::Url => "url",
            FilterContext::No => "no",
            FilterContext::Form => "form",
            FilterContext::Nav => "nav",
        }
    }
}

impl fmt::Display for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterContext::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown filter context: {}", s))
    }
}

/// A text transform applied to one output field.
///
/// Any `Fn(&str, FilterContext) -> String` closure is a filter:
///
/// ```
/// use gsa_client::filters::{FilterContext, FilterRegistry};
///
/// let mut registry = FilterRegistry::new();
/// registry.register(FilterContext::Title, |text: &str, _ctx: FilterContext| {
///     text.to_uppercase()
/// });
/// assert_eq!(registry.apply(FilterContext::Title, "rust"), "RUST");
/// ```
pub trait Filter: Send + Sync {
    /// Transform the text of a field
    fn apply(&self, text: &str, context: FilterContext) -> String;

    /// Name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Filter for F
where
    F: Fn(&str, FilterContext) -> String + Send + Sync,
{
    fn apply(&self, text: &str, context: FilterContext) -> String {
        self(text, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_round_trip_names() {
        for context in FilterContext::ALL {
            assert_eq!(context.as_str().parse::<FilterContext>(), Ok(context));
        }
        assert!("body".parse::<FilterContext>().is_err());
    }

    #[test]
    fn test_closure_is_filter() {
        let filter = |text: &str, ctx: FilterContext| format!("{}:{}", ctx, text);
        assert_eq!(filter.apply("x", FilterContext::Nav), "nav:x");
        assert_eq!(Filter::name(&filter), "custom");
    }
}

//! Text filters for titles, summaries and rendered fragments

use super::traits::{Filter, FilterContext};
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(/?)b>").unwrap());
static ITALIC_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(/?)i>").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Rewrites appliance highlighting markup: `<b>` becomes `<strong>`, `<i>`
/// becomes `<em>` and line breaks become spaces.
pub struct CleanMarkup;

impl CleanMarkup {
    pub fn clean(text: &str) -> String {
        let text = BOLD_TAG.replace_all(text, "<${1}strong>");
        let text = ITALIC_TAG.replace_all(&text, "<${1}em>");
        LINE_BREAK.replace_all(&text, " ").into_owned()
    }
}

impl Filter for CleanMarkup {
    fn apply(&self, text: &str, _context: FilterContext) -> String {
        Self::clean(text)
    }

    fn name(&self) -> &str {
        "clean_markup"
    }
}

/// Cuts text at the first occurrence of a marker, e.g. the `»` separating a
/// page title from the site name.
pub struct TruncateAt {
    marker: String,
}

impl TruncateAt {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Filter for TruncateAt {
    fn apply(&self, text: &str, _context: FilterContext) -> String {
        if self.marker.is_empty() {
            return text.to_string();
        }
        match text.find(&self.marker) {
            Some(pos) => text[..pos].to_string(),
            None => text.to_string(),
        }
    }

    fn name(&self) -> &str {
        "truncate_at"
    }
}

/// Wraps text in a span whose class is the filter context
pub struct WrapSpan;

impl Filter for WrapSpan {
    fn apply(&self, text: &str, context: FilterContext) -> String {
        format!("<span class=\"{}\">{}</span>", context, text)
    }

    fn name(&self) -> &str {
        "wrap_span"
    }
}

pub struct Trim;

impl Filter for Trim {
    fn apply(&self, text: &str, _context: FilterContext) -> String {
        text.trim().to_string()
    }

    fn name(&self) -> &str {
        "trim"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup() {
        assert_eq!(
            CleanMarkup::clean("An <b>open day</b> for <i>all</i><br>Book now<BR />"),
            "An <strong>open day</strong> for <em>all</em> Book now "
        );
        assert_eq!(CleanMarkup::clean("plain"), "plain");
    }

    #[test]
    fn test_clean_markup_leaves_other_tags() {
        assert_eq!(CleanMarkup::clean("<body><bdi>x</bdi>"), "<body><bdi>x</bdi>");
    }

    #[test]
    fn test_truncate_at() {
        let filter = TruncateAt::new("»");
        assert_eq!(
            filter.apply("Open days » University", FilterContext::Title),
            "Open days "
        );
        assert_eq!(filter.apply("No marker", FilterContext::Title), "No marker");
        assert_eq!(TruncateAt::new("").apply("x", FilterContext::Title), "x");
    }

    #[test]
    fn test_wrap_span() {
        assert_eq!(
            WrapSpan.apply("text", FilterContext::Summary),
            "<span class=\"summary\">text</span>"
        );
    }
}

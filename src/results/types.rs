//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single document returned by the appliance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// 1-based position in the overall result set (`R/@N`)
    pub index: u64,
    /// Display label for `index`, as produced by the "no" filters
    pub no: String,
    /// Title (`R/T`)
    pub title: String,
    /// Document URL (`R/U`)
    pub url: String,
    /// Snippet (`R/S`)
    pub summary: String,
}

impl Document {
    pub fn new(index: u64) -> Self {
        Self {
            index,
            no: index.to_string(),
            ..Default::default()
        }
    }
}

/// Results of one appliance search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Estimated number of matches (`RES/M`)
    pub total_count: u64,
    /// Query echoed back by the appliance (`Q`)
    pub query: String,
    /// 1-based index of the first document on this page (`RES/@SN`)
    pub start_index: u64,
    /// 1-based index of the last document on this page (`RES/@EN`)
    pub end_index: u64,
    /// A previous page exists (`RES/NB/PU`)
    pub has_previous: bool,
    /// A next page exists (`RES/NB/NU`)
    pub has_next: bool,
    /// Documents in response order
    pub documents: Vec<Document>,
}

impl SearchResult {
    /// Create an empty result for a query
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Check if there are no matches
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 1-based page holding `start_index`
    pub fn current_page(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.start_index.div_ceil(u64::from(per_page))
    }

    /// Whether the result set spans more than one page
    pub fn needs_paging(&self, per_page: u32) -> bool {
        self.total_count > u64::from(per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page() {
        let mut result = SearchResult::empty("rust");
        result.start_index = 1;
        assert_eq!(result.current_page(10), 1);
        result.start_index = 11;
        assert_eq!(result.current_page(10), 2);
        result.start_index = 20;
        assert_eq!(result.current_page(10), 2);
        assert_eq!(result.current_page(0), 0);
    }

    #[test]
    fn test_needs_paging() {
        let mut result = SearchResult::empty("rust");
        result.total_count = 10;
        assert!(!result.needs_paging(10));
        result.total_count = 11;
        assert!(result.needs_paging(10));
    }

    #[test]
    fn test_document_label_defaults_to_index() {
        let doc = Document::new(7);
        assert_eq!(doc.no, "7");
    }
}

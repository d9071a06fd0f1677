//! Query module
//!
//! Carries the caller's request parameters explicitly and turns them, together
//! with the appliance options, into the appliance query URL.

use crate::config::{ApplianceOptions, SearchOptions};
use std::collections::HashMap;

/// Query-string parameters of the page request being served
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    params: HashMap<String, String>,
    /// Absolute URL of the page being served, used as the form action when
    /// no search page URL is configured
    pub page_url: Option<String>,
}

impl RequestParams {
    /// Create empty request parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a parsed query-string map
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self {
            params,
            page_url: None,
        }
    }

    /// Add a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the URL of the page being served
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Get a raw parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|v| v.as_str())
    }

    /// Trimmed value of the search term parameter, empty if absent
    pub fn search_terms(&self, query_var: &str) -> String {
        self.get(query_var)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// 1-based page number; missing, malformed or zero values mean page 1
    pub fn page(&self, paging_var: &str) -> u32 {
        self.get(paging_var)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&page| page >= 1)
            .unwrap_or(1)
    }
}

/// Zero-based result offset of a 1-based page
pub fn offset_for_page(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

/// A fully resolved appliance query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceQuery {
    pub terms: String,
    pub offset: u64,
    pub per_page: u32,
}

impl ApplianceQuery {
    /// Resolve terms and paging from the request
    pub fn resolve(terms: &str, request: &RequestParams, options: &ApplianceOptions) -> Self {
        let page = request.page(options.paging_var());
        Self {
            terms: terms.to_string(),
            offset: offset_for_page(page, options.per_page()),
            per_page: options.per_page(),
        }
    }

    /// Build the appliance request URL
    pub fn to_url(&self, options: &ApplianceOptions, search_options: &SearchOptions) -> String {
        let mut url = format!(
            "{}?site={}&q={}&start={}&num={}",
            options.appliance_url(),
            urlencoding::encode(options.appliance_name()),
            urlencoding::encode(&self.terms),
            self.offset,
            self.per_page
        );
        for (name, value) in search_options.non_empty() {
            url.push('&');
            url.push_str(&urlencoding::encode(name));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

//! Tracking parameter remover for result URLs

use super::traits::{Filter, FilterContext};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const TRACKING_PARAMS: [&str; 12] = [
    "gclid", "gclsrc", "fbclid", "msclkid", "twclid", "mc_eid", "mc_cid", "_hsenc", "_hsmi",
    "__hstc", "__hsfp", "s_kwcid",
];

static TRACKING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(utm_|_ga).*$").unwrap());

/// Filter that strips tracking query parameters from document URLs.
/// Anything that does not parse as an absolute URL passes through unchanged.
pub struct StripTracking;

impl StripTracking {
    pub fn clean_url(url: &str) -> String {
        let mut parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return url.to_string(),
        };
        if parsed.query().is_none() {
            return url.to_string();
        }

        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| !Self::is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(kept);
        }
        parsed.to_string()
    }

    fn is_tracking_param(param: &str) -> bool {
        TRACKING_PARAMS.contains(&param) || TRACKING_PATTERN.is_match(param)
    }
}

impl Filter for StripTracking {
    fn apply(&self, text: &str, _context: FilterContext) -> String {
        Self::clean_url(text)
    }

    fn name(&self) -> &str {
        "strip_tracking"
    }
}

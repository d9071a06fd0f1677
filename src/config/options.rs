//! Appliance and search options with merge-over-defaults semantics

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

static HTTP_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Default appliance search parameters, in the order they are sent
const DEFAULT_SEARCH_OPTIONS: [(&str, &str); 5] = [
    ("sort", "date:D:L:d1"),
    ("output", "xml_no_dtd"),
    ("filter", "1"),
    ("ie", "UTF-8"),
    ("oe", "UTF-8"),
];

/// Check that a URL is an absolute http(s) URL
pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => true,
        _ => HTTP_PREFIX.is_match(url),
    }
}

/// Caller-supplied appliance options. Missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplianceOverrides {
    /// Appliance search endpoint, e.g. `http://gsa.example.com/search`
    pub appliance_url: Option<String>,
    /// Collection(s) configured on the appliance, e.g. `app1|app2`
    pub appliance_name: Option<String>,
    /// URL of the page hosting the search form
    pub search_url: Option<String>,
    /// Query-string parameter carrying the search terms
    pub query_var: Option<String>,
    /// Query-string parameter carrying the 1-based page number
    pub paging_var: Option<String>,
    /// Outgoing proxy for appliance requests
    pub proxy: Option<String>,
    /// Results requested per page
    pub per_page: Option<u32>,
}

/// Validated appliance options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplianceOptions {
    appliance_url: String,
    appliance_name: String,
    search_url: String,
    query_var: String,
    paging_var: String,
    proxy: String,
    per_page: u32,
}

impl Default for ApplianceOptions {
    fn default() -> Self {
        Self {
            appliance_url: String::new(),
            appliance_name: String::new(),
            search_url: String::new(),
            query_var: "s".to_string(),
            paging_var: "paged".to_string(),
            proxy: String::new(),
            per_page: 10,
        }
    }
}

impl ApplianceOptions {
    /// Build options from defaults with the supplied overrides applied
    /// through the validating setters.
    pub fn from_overrides(overrides: &ApplianceOverrides) -> Self {
        let mut options = Self::default();
        options.apply(overrides);
        options
    }

    /// Defaults with the supplied overrides applied, except that the
    /// validated appliance URL, appliance name and search URL start from
    /// their current values so a rejected replacement keeps them.
    pub fn reconfigured(&self, overrides: &ApplianceOverrides) -> Self {
        let mut options = Self {
            appliance_url: self.appliance_url.clone(),
            appliance_name: self.appliance_name.clone(),
            search_url: self.search_url.clone(),
            ..Self::default()
        };
        options.apply(overrides);
        options
    }

    /// Apply overrides on top of the current values. Rejected values keep
    /// whatever was there before.
    pub fn apply(&mut self, overrides: &ApplianceOverrides) {
        if let Some(ref url) = overrides.appliance_url {
            self.set_appliance_url(url);
        }
        if let Some(ref name) = overrides.appliance_name {
            self.set_appliance_name(name);
        }
        if let Some(ref url) = overrides.search_url {
            self.set_search_url(url);
        }
        if let Some(ref var) = overrides.query_var {
            self.set_query_var(var);
        }
        if let Some(ref var) = overrides.paging_var {
            self.set_paging_var(var);
        }
        if let Some(ref proxy) = overrides.proxy {
            self.set_proxy(proxy);
        }
        if let Some(per_page) = overrides.per_page {
            self.set_per_page(per_page);
        }
    }

    /// Set the appliance URL if it is a valid http(s) URL
    pub fn set_appliance_url(&mut self, url: &str) -> bool {
        if is_valid_url(url) {
            self.appliance_url = url.trim().to_string();
            true
        } else {
            warn!("Rejected appliance URL {:?}", url);
            false
        }
    }

    /// Set the appliance name if it is not blank
    pub fn set_appliance_name(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            warn!("Rejected blank appliance name");
            return false;
        }
        self.appliance_name = name.trim().to_string();
        true
    }

    /// Set the search page URL if it is a valid http(s) URL
    pub fn set_search_url(&mut self, url: &str) -> bool {
        if is_valid_url(url) {
            self.search_url = url.trim().to_string();
            true
        } else {
            if !url.trim().is_empty() {
                warn!("Rejected search page URL {:?}", url);
            }
            false
        }
    }

    pub fn set_query_var(&mut self, var: &str) -> bool {
        set_var(&mut self.query_var, var, "query")
    }

    pub fn set_paging_var(&mut self, var: &str) -> bool {
        set_var(&mut self.paging_var, var, "paging")
    }

    /// Set the outgoing proxy; an empty value disables it
    pub fn set_proxy(&mut self, proxy: &str) -> bool {
        self.proxy = proxy.trim().to_string();
        true
    }

    /// Set results per page; zero is rejected
    pub fn set_per_page(&mut self, per_page: u32) -> bool {
        if per_page == 0 {
            warn!("Rejected zero results per page");
            return false;
        }
        self.per_page = per_page;
        true
    }

    pub fn appliance_url(&self) -> &str {
        &self.appliance_url
    }

    pub fn appliance_name(&self) -> &str {
        &self.appliance_name
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    pub fn query_var(&self) -> &str {
        &self.query_var
    }

    pub fn paging_var(&self) -> &str {
        &self.paging_var
    }

    /// Proxy URL, if one is configured
    pub fn proxy(&self) -> Option<&str> {
        if self.proxy.is_empty() {
            None
        } else {
            Some(&self.proxy)
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Whether the required appliance URL and name are both present
    pub fn is_searchable(&self) -> bool {
        !self.appliance_url.is_empty() && !self.appliance_name.is_empty()
    }
}

fn set_var(slot: &mut String, var: &str, kind: &str) -> bool {
    let var = var.trim();
    if var.is_empty() {
        warn!("Rejected blank {} variable name", kind);
        return false;
    }
    *slot = var.to_string();
    true
}

/// Appliance query parameters sent with every search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    params: Vec<(String, String)>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            params: DEFAULT_SEARCH_OPTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SearchOptions {
    /// Merge supplied options over the defaults. Known keys replace the
    /// default value in place, other keys are appended.
    pub fn from_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut options = Self::default();
        for (key, value) in overrides {
            options.set(key, value);
        }
        options
    }

    /// Set a single option
    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    /// Get an option value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Options with a non-blank value, in send order
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.trim()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Deserialize a map of YAML scalars into strings, so `filter: 1` and
/// `filter: "1"` mean the same thing.
pub fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_yaml::Value> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "search option {} must be a scalar, got {:?}",
                        key, other
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

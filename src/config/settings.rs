//! Settings structures for gsa-client configuration

use super::options::{scalar_map, ApplianceOptions, ApplianceOverrides, SearchOptions};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub appliance: ApplianceOverrides,
    #[serde(deserialize_with = "scalar_map")]
    pub search: BTreeMap<String, String>,
    pub filters: FilterSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (GSA_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("GSA_APPLIANCE_URL") {
            self.appliance.appliance_url = Some(val);
        }
        if let Some(val) = lookup("GSA_APPLIANCE_NAME") {
            self.appliance.appliance_name = Some(val);
        }
        if let Some(val) = lookup("GSA_SEARCH_URL") {
            self.appliance.search_url = Some(val);
        }
        if let Some(val) = lookup("GSA_PROXY") {
            self.appliance.proxy = Some(val);
        }
        if let Some(val) = lookup("GSA_PER_PAGE") {
            if let Ok(per_page) = val.parse() {
                self.appliance.per_page = Some(per_page);
            }
        }
        if let Some(val) = lookup("GSA_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("GSA_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Validated appliance options
    pub fn appliance_options(&self) -> ApplianceOptions {
        ApplianceOptions::from_overrides(&self.appliance)
    }

    /// Search options merged over the defaults
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::from_overrides(&self.search)
    }
}

/// Filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Convert appliance `<b>`/`<i>`/`<br>` markup in titles and summaries
    pub clean_markup: bool,
    /// Named built-in filters per context, e.g. `title: ["truncate_at:»"]`
    pub pipelines: BTreeMap<String, Vec<String>>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            clean_markup: true,
            pipelines: BTreeMap::new(),
        }
    }
}

/// Demo server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Page title for the demo search page
    pub title: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            title: "Search".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = HTTP client default)
    pub request_timeout: Option<f64>,
    /// User agent string (none = crate name and version)
    pub user_agent: Option<String>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: None,
            verify_ssl: true,
        }
    }
}

//! gsa-client: a client for search appliance XML APIs
//!
//! Builds appliance query URLs from explicit request parameters, fetches and
//! parses the XML response, runs result fields through configurable filter
//! pipelines, and renders a search form, result list and paging navigation.
//!
//! ```no_run
//! use gsa_client::{ApplianceOverrides, FilterContext, RequestParams, SearchClient};
//! use std::collections::BTreeMap;
//!
//! # async fn run() -> gsa_client::Result<()> {
//! let mut client = SearchClient::new(
//!     &ApplianceOverrides {
//!         appliance_url: Some("http://gsa.example.com/search".to_string()),
//!         appliance_name: Some("app1|app2".to_string()),
//!         ..Default::default()
//!     },
//!     &BTreeMap::new(),
//! )?;
//! client.register_filter_by_name("title", "truncate_at:»");
//!
//! let request = RequestParams::new().param("s", "open day");
//! if let Some(result) = client.search(None, &request).await? {
//!     println!("{}", client.render_results(Some(&result), &request)?);
//!     println!("{}", client.render_paging_nav(&result, &request)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::{ApplianceOptions, ApplianceOverrides, SearchOptions, Settings};
pub use error::{GsaError, Result};
pub use filters::{Filter, FilterContext, FilterRegistry};
pub use query::RequestParams;
pub use results::{Document, SearchResult};
pub use search::SearchClient;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! HTTP networking module
//!
//! Provides the HTTP client used to query the search appliance.

mod client;

pub use client::HttpClient;

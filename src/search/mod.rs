//! Search module
//!
//! The appliance client: option handling, one request per search, result
//! filtering and HTML fragment rendering.

mod client;

pub use client::SearchClient;

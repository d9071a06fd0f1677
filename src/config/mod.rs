//! Configuration module for gsa-client
//!
//! Handles loading settings from YAML files and environment variables, and
//! merging caller-supplied appliance and search options over their defaults.

mod options;
mod settings;

pub use options::*;
pub use settings::*;

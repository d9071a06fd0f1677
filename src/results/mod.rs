//! Result types and XML response parsing
//!
//! This module defines the result structures handed to callers and the parser
//! that builds them from the appliance's XML envelope.

mod parser;
mod types;

pub use parser::parse_response;
pub use types::*;

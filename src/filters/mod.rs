//! Output filter pipelines
//!
//! Each output field (title, summary, url, no) and each rendered fragment
//! (form, nav) has an ordered pipeline of text filters. Filters run in the
//! order they were registered.

mod registry;
mod traits;

// Built-in filters
pub mod markup;
pub mod tracker_remover;

pub use registry::{builtin, FilterRegistry};
pub use traits::*;

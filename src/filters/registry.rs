//! Filter registry holding one ordered pipeline per output field

use super::markup::{CleanMarkup, Trim, TruncateAt, WrapSpan};
use super::tracker_remover::StripTracking;
use super::traits::{Filter, FilterContext};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Look up a built-in filter by name.
///
/// Known names: `clean_markup`, `trim`, `wrap_span`, `strip_tracking` and
/// `truncate_at:<marker>`.
pub fn builtin(name: &str) -> Option<Arc<dyn Filter>> {
    let name = name.trim();
    if let Some(marker) = name.strip_prefix("truncate_at:") {
        if marker.is_empty() {
            return None;
        }
        return Some(Arc::new(TruncateAt::new(marker)));
    }
    match name {
        "clean_markup" => Some(Arc::new(CleanMarkup)),
        "trim" => Some(Arc::new(Trim)),
        "wrap_span" => Some(Arc::new(WrapSpan)),
        "strip_tracking" => Some(Arc::new(StripTracking)),
        _ => None,
    }
}

/// Ordered filter pipelines keyed by context
#[derive(Clone, Default)]
pub struct FilterRegistry {
    pipelines: HashMap<FilterContext, Vec<Arc<dyn Filter>>>,
}

impl FilterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter to a context's pipeline
    pub fn register(&mut self, context: FilterContext, filter: impl Filter + 'static) {
        self.register_shared(context, Arc::new(filter));
    }

    /// Append an already shared filter to a context's pipeline
    pub fn register_shared(&mut self, context: FilterContext, filter: Arc<dyn Filter>) {
        debug!("Registered filter {} for {}", filter.name(), context);
        self.pipelines.entry(context).or_default().push(filter);
    }

    /// Register a built-in filter by name. Unknown contexts or filter names
    /// are skipped and reported as `false`.
    pub fn register_named(&mut self, context: &str, name: &str) -> bool {
        let context = match context.parse::<FilterContext>() {
            Ok(context) => context,
            Err(e) => {
                warn!("Skipping filter {}: {}", name, e);
                return false;
            }
        };
        match builtin(name) {
            Some(filter) => {
                self.register_shared(context, filter);
                true
            }
            None => {
                warn!("Skipping unknown filter {:?} for {}", name, context);
                false
            }
        }
    }

    /// Run text through a context's pipeline in registration order
    pub fn apply(&self, context: FilterContext, text: &str) -> String {
        match self.pipelines.get(&context) {
            Some(filters) => filters
                .iter()
                .fold(text.to_string(), |acc, filter| filter.apply(&acc, context)),
            None => text.to_string(),
        }
    }

    /// Number of filters registered for a context
    pub fn len(&self, context: FilterContext) -> usize {
        self.pipelines.get(&context).map_or(0, Vec::len)
    }

    /// Check if no filters are registered at all
    pub fn is_empty(&self) -> bool {
        self.pipelines.values().all(Vec::is_empty)
    }

    /// Names of the filters registered for a context, in order
    pub fn names(&self, context: FilterContext) -> Vec<String> {
        self.pipelines
            .get(&context)
            .map(|filters| filters.iter().map(|f| f.name().to_string()).collect())
            .unwrap_or_default()
    }
}

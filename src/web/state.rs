//! Application state shared across handlers

use crate::config::Settings;
use crate::search::SearchClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Configured appliance client
    pub client: Arc<SearchClient>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings) -> crate::Result<Self> {
        let client = SearchClient::from_settings(&settings)?;
        Ok(Self::with_client(settings, client))
    }

    /// Create state around an already configured client, sharing its
    /// templates
    pub fn with_client(settings: Settings, client: SearchClient) -> Self {
        Self {
            settings: Arc::new(settings),
            templates: client.templates(),
            client: Arc::new(client),
        }
    }

    /// Title of the demo search page
    pub fn title(&self) -> &str {
        &self.settings.server.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shares_client_templates() {
        let state = AppState::new(Settings::default()).unwrap();
        assert!(Arc::ptr_eq(&state.templates, &state.client.templates()));
        assert_eq!(state.title(), "Search");
    }
}

//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::convert::ConversionService;
use crate::workspace::{Session, SessionManager};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    sessions: SessionManager,
    conversions: ConversionService,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: Config) -> Self {
        let conversions = ConversionService::from_config(&config.conversion);
        Self::with_services(config, conversions)
    }

    /// Create application state with an explicit conversion service
    pub fn with_services(config: Config, conversions: ConversionService) -> Self {
        let sessions = SessionManager::with_ttl_minutes(config.session.ttl_minutes);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions,
                conversions,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }

    /// Get the conversion service
    pub fn conversions(&self) -> &ConversionService {
        &self.inner.conversions
    }

    /// Resolve a session from its path segment
    pub async fn session(&self, id: &str) -> crate::error::Result<Session> {
        Ok(self.inner.sessions.get_session_by_str(id).await?)
    }
}

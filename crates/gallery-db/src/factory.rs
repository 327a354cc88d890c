//! Context construction for out-of-band tooling.
//!
//! Used by schema migrations to obtain a writable context. Don't use it for
//! request-scoped work: contexts it produces never respect read-only mode.

use gallery_config::Config;

use crate::context::GalleryContext;

/// Builds [`GalleryContext`] instances for migration tooling.
///
/// The connection target comes from an explicit override when one was
/// supplied (set once at startup or per test), otherwise from the
/// configuration.
pub struct ContextFactory {
    config: Config,
    override_database_url: Option<String>,
}

impl ContextFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            override_database_url: None,
        }
    }

    /// Redirects the factory to a non-default connection target.
    pub fn with_override(mut self, database_url: impl Into<String>) -> Self {
        self.override_database_url = Some(database_url.into());
        self
    }

    /// Constructs a writable context.
    ///
    /// Always `read_only = false`: without write access, database migrations
    /// would fail and the whole site would be down, even when the pending
    /// migrations are a no-op.
    pub fn create(&self) -> GalleryContext {
        let database_url = self
            .override_database_url
            .clone()
            .unwrap_or_else(|| self.config.database_url.clone());

        GalleryContext::new(database_url, false)
    }
}

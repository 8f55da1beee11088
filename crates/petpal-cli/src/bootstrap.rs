//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Gemini client (via petpal-gemini) for advice and facility search
//! - Headless map surfaces and random marker jitter (via petpal-core)
//! - `AppCore` over the seeded registry
//!
//! Command handlers receive the fully-composed `AppCore` and delegate work to it.

use std::sync::Arc;

use anyhow::Result;
use petpal_core::map::{HeadlessMapFactory, JitterSource, MapSessionDeps, RandomJitter};
use petpal_core::ports::{FacilitySearchPort, HealthAdvisorPort, NoopEmitter};
use petpal_core::services::AppCore;
use petpal_core::{Settings, SettingsError, validate_settings};
use petpal_gemini::{DefaultGeminiClient, GeminiClientConfig};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: Settings,
}

impl CliConfig {
    /// Defaults overlaid with the environment (`PETPAL_*`, API key).
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            settings: Settings::from_env()?,
        })
    }

    /// Create config with default settings.
    pub fn with_defaults() -> Self {
        Self {
            settings: Settings::with_defaults(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Whether requests to the AI gateway can authenticate.
    pub has_api_key: bool,
}

impl CliContext {
    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Bootstrap the CLI application.
///
/// The CLI has no frontend to broadcast events to, so it uses `NoopEmitter`.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let settings = &config.settings;
    validate_settings(settings)?;

    let gemini_config = GeminiClientConfig::from_settings(settings);
    let has_api_key = gemini_config.has_api_key();
    let gemini = Arc::new(DefaultGeminiClient::new(&gemini_config)?);

    let app = assemble(
        settings,
        gemini.clone(),
        gemini,
        Arc::new(RandomJitter::new(settings.effective_jitter_span())),
    )?;
    Ok(CliContext { app, has_api_key })
}

/// Bootstrap with custom gateways (for testing).
pub fn bootstrap_with(
    settings: &Settings,
    advisor: Arc<dyn HealthAdvisorPort>,
    search: Arc<dyn FacilitySearchPort>,
    jitter: Arc<dyn JitterSource>,
) -> Result<CliContext> {
    let app = assemble(settings, advisor, search, jitter)?;
    Ok(CliContext {
        app,
        has_api_key: true,
    })
}

fn assemble(
    settings: &Settings,
    advisor: Arc<dyn HealthAdvisorPort>,
    search: Arc<dyn FacilitySearchPort>,
    jitter: Arc<dyn JitterSource>,
) -> Result<AppCore> {
    let map_deps = MapSessionDeps {
        surfaces: Arc::new(HeadlessMapFactory::new()),
        search,
        jitter,
        events: Arc::new(NoopEmitter::new()),
        view: settings.map_view(),
    };
    Ok(AppCore::seeded(advisor, map_deps)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_with_defaults() {
        let ctx = bootstrap(&CliConfig::with_defaults()).unwrap();
        assert!(!ctx.has_api_key);
    }

    #[test]
    fn test_bootstrap_with_api_key() {
        let mut config = CliConfig::with_defaults();
        config.settings.api_key = Some("key".to_string());
        assert!(bootstrap(&config).unwrap().has_api_key);
    }
}

//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use petpal_core::map::{HeadlessMapFactory, JitterSource, MapSessionDeps, RandomJitter};
use petpal_core::ports::{AppEventEmitter, FacilitySearchPort, HealthAdvisorPort};
use petpal_core::services::AppCore;
use petpal_core::{Settings, validate_settings};
use petpal_gemini::{DefaultGeminiClient, GeminiClientConfig};

use crate::sse::SseBroadcaster;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Application settings (map view, models, API key).
    pub settings: Settings,
}

impl ServerConfig {
    /// Create config from application settings.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            port: settings.effective_http_port(),
            static_dir: None,
            cors: CorsConfig::default(),
            settings,
        }
    }

    /// Create config with default settings.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_settings(Settings::with_defaults())
    }

    /// Override the listening port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// SSE broadcaster for real-time events.
    pub sse: Arc<SseBroadcaster>,
}

/// Gateway and placement adapters injected into the context.
pub struct ContextDeps {
    pub advisor: Arc<dyn HealthAdvisorPort>,
    pub search: Arc<dyn FacilitySearchPort>,
    pub jitter: Arc<dyn JitterSource>,
}

impl AxumContext {
    /// Assemble a context over the seeded registry.
    ///
    /// Map widgets are headless: the browser draws the map from the session
    /// snapshot, the server only owns the view state.
    pub fn assemble(settings: &Settings, deps: ContextDeps) -> Result<Self> {
        let sse = Arc::new(SseBroadcaster::with_defaults());
        let map_deps = MapSessionDeps {
            surfaces: Arc::new(HeadlessMapFactory::new()),
            search: deps.search,
            jitter: deps.jitter,
            events: sse.clone() as Arc<dyn AppEventEmitter>,
            view: settings.map_view(),
        };
        let core = Arc::new(AppCore::seeded(deps.advisor, map_deps)?);
        Ok(Self { core, sse })
    }
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let settings = &config.settings;
    validate_settings(settings)?;

    let gemini_config = GeminiClientConfig::from_settings(settings);
    if !gemini_config.has_api_key() {
        tracing::warn!(
            target: "petpal.gateway",
            "No API key configured; advice and facility search will use fallbacks"
        );
    }
    let gemini = Arc::new(DefaultGeminiClient::new(&gemini_config)?);

    tracing::info!(
        target: "petpal.http",
        advice_model = settings.effective_advice_model(),
        search_model = settings.effective_search_model(),
        default_center = %settings.map_view().default_center,
        "Axum bootstrap resolved settings"
    );

    AxumContext::assemble(
        settings,
        ContextDeps {
            advisor: gemini.clone(),
            search: gemini,
            jitter: Arc::new(RandomJitter::new(settings.effective_jitter_span())),
        },
    )
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;

    // Choose router based on whether static serving is configured
    let app = if let Some(ref static_dir) = config.static_dir {
        info!(target: "petpal.http", "Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!(target: "petpal.http", "petpal web server (with UI) listening on http://{addr}");
    } else {
        info!(target: "petpal.http", "petpal web server (API only) listening on http://{addr}");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

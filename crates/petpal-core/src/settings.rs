//! Settings domain types and validation.
//!
//! Settings are pure values: defaults, environment overrides and validation.
//! Reading the `.env` file is the binary's job.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DEFAULT_CENTER, DEFAULT_ZOOM, RECENTER_ZOOM};
use crate::map::{DEFAULT_JITTER_SPAN, MapViewConfig};

/// Default port for the web adapter.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Model used for free-text health advice.
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-3-flash-preview";

/// Model used for location-grounded facility search.
pub const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";

/// Environment variables holding the gateway API key, in lookup order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application settings.
///
/// All fields are optional so that partial configuration falls back to the
/// `effective_*` defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Map center used when the user's position is unknown.
    pub default_center: Option<Coordinate>,

    /// Zoom of the initial view.
    pub default_zoom: Option<u8>,

    /// Zoom used by "recenter".
    pub recenter_zoom: Option<u8>,

    /// Width of the marker jitter window in degrees.
    pub jitter_span: Option<f64>,

    /// Port for the web adapter.
    pub http_port: Option<u16>,

    pub advice_model: Option<String>,

    pub search_model: Option<String>,

    /// Gateway API key. Never serialized.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            default_center: Some(DEFAULT_CENTER),
            default_zoom: Some(DEFAULT_ZOOM),
            recenter_zoom: Some(RECENTER_ZOOM),
            jitter_span: Some(DEFAULT_JITTER_SPAN),
            http_port: Some(DEFAULT_HTTP_PORT),
            advice_model: Some(DEFAULT_ADVICE_MODEL.to_string()),
            search_model: Some(DEFAULT_SEARCH_MODEL.to_string()),
            api_key: None,
        }
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::with_defaults();
        settings.apply_env(|key| std::env::var(key).ok())?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Overlay values from `lookup` (an environment reader).
    ///
    /// Recognised keys: `PETPAL_DEFAULT_LAT`, `PETPAL_DEFAULT_LNG`,
    /// `PETPAL_DEFAULT_ZOOM`, `PETPAL_RECENTER_ZOOM`, `PETPAL_JITTER_SPAN`,
    /// `PETPAL_PORT`, `PETPAL_ADVICE_MODEL`, `PETPAL_SEARCH_MODEL` and the
    /// API key variables in [`API_KEY_VARS`]. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lat = get("PETPAL_DEFAULT_LAT").map(|v| parse_env::<f64>("PETPAL_DEFAULT_LAT", &v));
        let lng = get("PETPAL_DEFAULT_LNG").map(|v| parse_env::<f64>("PETPAL_DEFAULT_LNG", &v));
        match (lat, lng) {
            (Some(lat), Some(lng)) => {
                self.default_center = Some(Coordinate::new(lat?, lng?));
            }
            (None, None) => {}
            _ => return Err(SettingsError::PartialCenter),
        }

        if let Some(v) = get("PETPAL_DEFAULT_ZOOM") {
            self.default_zoom = Some(parse_env("PETPAL_DEFAULT_ZOOM", &v)?);
        }
        if let Some(v) = get("PETPAL_RECENTER_ZOOM") {
            self.recenter_zoom = Some(parse_env("PETPAL_RECENTER_ZOOM", &v)?);
        }
        if let Some(v) = get("PETPAL_JITTER_SPAN") {
            self.jitter_span = Some(parse_env("PETPAL_JITTER_SPAN", &v)?);
        }
        if let Some(v) = get("PETPAL_PORT") {
            self.http_port = Some(parse_env("PETPAL_PORT", &v)?);
        }
        if let Some(v) = get("PETPAL_ADVICE_MODEL") {
            self.advice_model = Some(v.trim().to_string());
        }
        if let Some(v) = get("PETPAL_SEARCH_MODEL") {
            self.search_model = Some(v.trim().to_string());
        }
        if let Some(key) = API_KEY_VARS.iter().find_map(|k| get(*k)) {
            self.api_key = Some(key.trim().to_string());
        }
        Ok(())
    }

    #[must_use]
    pub fn effective_http_port(&self) -> u16 {
        self.http_port.unwrap_or(DEFAULT_HTTP_PORT)
    }

    #[must_use]
    pub fn effective_jitter_span(&self) -> f64 {
        self.jitter_span.unwrap_or(DEFAULT_JITTER_SPAN)
    }

    #[must_use]
    pub fn effective_advice_model(&self) -> &str {
        self.advice_model.as_deref().unwrap_or(DEFAULT_ADVICE_MODEL)
    }

    #[must_use]
    pub fn effective_search_model(&self) -> &str {
        self.search_model.as_deref().unwrap_or(DEFAULT_SEARCH_MODEL)
    }

    /// View parameters for map sessions.
    #[must_use]
    pub fn map_view(&self) -> MapViewConfig {
        MapViewConfig {
            default_center: self.default_center.unwrap_or(DEFAULT_CENTER),
            default_zoom: self.default_zoom.unwrap_or(DEFAULT_ZOOM),
            recenter_zoom: self.recenter_zoom.unwrap_or(RECENTER_ZOOM),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("PETPAL_DEFAULT_LAT and PETPAL_DEFAULT_LNG must be set together")]
    PartialCenter,

    #[error("Default center is not a valid coordinate: {0}")]
    InvalidCenter(Coordinate),

    #[error("Zoom must be between 1 and 19, got {0}")]
    InvalidZoom(u8),

    #[error("Jitter span must be between 0 and 1 degree, got {0}")]
    InvalidJitterSpan(f64),

    #[error("Port should be >= 1024 (privileged ports require root), got {0}")]
    InvalidPort(u16),

    #[error("Model name cannot be empty")]
    EmptyModelName,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(center) = settings.default_center {
        if !center.is_valid() {
            return Err(SettingsError::InvalidCenter(center));
        }
    }

    for zoom in [settings.default_zoom, settings.recenter_zoom]
        .into_iter()
        .flatten()
    {
        if !(1..=19).contains(&zoom) {
            return Err(SettingsError::InvalidZoom(zoom));
        }
    }

    if let Some(span) = settings.jitter_span {
        if !span.is_finite() || !(0.0..=1.0).contains(&span) {
            return Err(SettingsError::InvalidJitterSpan(span));
        }
    }

    if let Some(port) = settings.http_port {
        if port < 1024 {
            return Err(SettingsError::InvalidPort(port));
        }
    }

    if [&settings.advice_model, &settings.search_model]
        .into_iter()
        .flatten()
        .any(|m| m.trim().is_empty())
    {
        return Err(SettingsError::EmptyModelName);
    }

    Ok(())
}

//! Geolocation capability port.
//!
//! The map session asks exactly once per mount. Failure is never fatal: the
//! session stays on the default center.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Coordinate;

/// Why no position could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Best-effort, single-shot position lookup.
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    async fn locate(&self) -> Result<Coordinate, GeolocationError>;
}

/// A position already known to the caller (browser report, CLI flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl GeolocationPort for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(GeolocationError::Unavailable(format!(
                "invalid coordinate {}",
                self.0
            )))
        }
    }
}

/// No position source: the caller denied or could not provide one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

#[async_trait]
impl GeolocationPort for DeniedLocation {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

//! Geographic primitives for the map view.

use serde::{Deserialize, Serialize};

/// Fallback center when the user's position is unknown (Seoul City Hall).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(37.5665, 126.9780);

/// Zoom used when the map is created and after locating the user.
pub const DEFAULT_ZOOM: u8 = 14;

/// Zoom used by the recenter button.
pub const RECENTER_ZOOM: u8 = 15;

/// Base tile layer attached to every map widget.
pub const BASE_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";

/// Maximum zoom supported by [`BASE_TILE_URL`].
pub const BASE_TILE_MAX_ZOOM: u8 = 19;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// This coordinate shifted by the given deltas in degrees.
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

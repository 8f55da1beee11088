//! Map rendering surface port.
//!
//! A surface is the drawable map widget: a base tile layer, one marker
//! layer and an optional "you are here" indicator. Surfaces are created by a
//! [`MapSurfaceFactory`] and must be released exactly once; the core wraps
//! them in `map::MapWidget`, which releases on drop.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;
use crate::domain::geo::{BASE_TILE_MAX_ZOOM, BASE_TILE_URL};

/// Parameters for creating a map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapInit {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_url: String,
    pub max_zoom: u8,
}

impl MapInit {
    /// Initial view with the standard base tile layer.
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            tile_url: BASE_TILE_URL.to_string(),
            max_zoom: BASE_TILE_MAX_ZOOM,
        }
    }
}

/// A marker drawn on the marker layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinate,
    pub title: String,
    pub uri: String,
    /// Popup caption, e.g. "Recommended for Miho".
    pub caption: String,
}

/// Drawable map widget.
pub trait MapSurface: Send {
    /// Move the viewport.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Draw (or move) the fixed "you are here" indicator.
    fn show_user_location(&mut self, position: Coordinate);

    /// Remove every marker from the marker layer.
    fn clear_markers(&mut self);

    /// Add one marker to the marker layer.
    fn add_marker(&mut self, marker: &Marker);

    /// Destroy the widget. Called exactly once.
    fn release(&mut self);
}

/// Creates map surfaces bound to a view slot.
pub trait MapSurfaceFactory: Send + Sync {
    /// Create a surface, attach the base tile layer and an empty marker layer.
    fn create(&self, init: &MapInit) -> Box<dyn MapSurface>;
}

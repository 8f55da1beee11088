//! Display helpers for pets, insights and places.

use petpal_core::Coordinate;
use petpal_core::services::HealthInsight;

/// Age in years with one decimal, e.g. `3.4 yrs`.
pub fn format_age(years: f64) -> String {
    format!("{years:.1} yrs")
}

/// Coordinate with the precision shown on the map panel.
pub fn format_coordinate(position: Coordinate) -> String {
    format!("{:.4}, {:.4}", position.lat, position.lng)
}

/// Heading printed above advice text.
pub fn insight_heading(insight: &HealthInsight) -> String {
    if insight.fallback {
        format!("AI Health Insight for {} (unavailable)", insight.pet_type)
    } else {
        format!("AI Health Insight for {}", insight.pet_type)
    }
}

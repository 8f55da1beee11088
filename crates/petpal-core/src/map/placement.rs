//! Approximate marker placement.
//!
//! The search gateway returns no coordinates for its places, so each result
//! is plotted at the search center plus a bounded random offset.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Coordinate, Facility, PlaceReference};

/// Default width of the jitter window in degrees (offsets in `±0.0075`).
pub const DEFAULT_JITTER_SPAN: f64 = 0.015;

/// Source of per-marker offsets in degrees.
pub trait JitterSource: Send + Sync {
    /// `(d_lat, d_lng)`, each in `[-span / 2, span / 2)`.
    fn offset(&self) -> (f64, f64);
}

/// Thread-local RNG jitter for production use.
#[derive(Debug, Clone, Copy)]
pub struct RandomJitter {
    half_span: f64,
}

impl RandomJitter {
    pub fn new(span: f64) -> Self {
        Self {
            half_span: span.abs() / 2.0,
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_SPAN)
    }
}

impl JitterSource for RandomJitter {
    fn offset(&self) -> (f64, f64) {
        sample(&mut rand::thread_rng(), self.half_span)
    }
}

/// Deterministic jitter from a fixed seed.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
    half_span: f64,
}

impl SeededJitter {
    pub fn new(seed: u64, span: f64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            half_span: span.abs() / 2.0,
        }
    }
}

impl JitterSource for SeededJitter {
    fn offset(&self) -> (f64, f64) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        sample(&mut *rng, self.half_span)
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, half_span: f64) -> (f64, f64) {
    if half_span <= 0.0 || !half_span.is_finite() {
        return (0.0, 0.0);
    }
    (
        rng.gen_range(-half_span..half_span),
        rng.gen_range(-half_span..half_span),
    )
}

/// Plot each place near `center`, preserving order.
pub fn place_near(
    center: Coordinate,
    places: Vec<PlaceReference>,
    jitter: &dyn JitterSource,
) -> Vec<Facility> {
    places
        .into_iter()
        .map(|place| {
            let (d_lat, d_lng) = jitter.offset();
            Facility {
                title: place.title,
                uri: place.uri,
                position: center.offset(d_lat, d_lng),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_CENTER;

    fn places(n: usize) -> Vec<PlaceReference> {
        (0..n)
            .map(|i| PlaceReference {
                title: format!("Place {i}"),
                uri: format!("https://maps.example/{i}"),
            })
            .collect()
    }

    #[test]
    fn test_offsets_stay_within_bounds() {
        let jitter = RandomJitter::default();
        for _ in 0..1000 {
            let (d_lat, d_lng) = jitter.offset();
            assert!((-0.0075..0.0075).contains(&d_lat));
            assert!((-0.0075..0.0075).contains(&d_lng));
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let a = SeededJitter::new(7, DEFAULT_JITTER_SPAN);
        let b = SeededJitter::new(7, DEFAULT_JITTER_SPAN);
        for _ in 0..10 {
            assert_eq!(a.offset(), b.offset());
        }
    }

    #[test]
    fn test_zero_span_places_on_center() {
        let jitter = RandomJitter::new(0.0);
        let facilities = place_near(DEFAULT_CENTER, places(2), &jitter);
        assert!(facilities.iter().all(|f| f.position == DEFAULT_CENTER));
    }

    #[test]
    fn test_place_near_keeps_order_and_links() {
        let jitter = SeededJitter::new(1, DEFAULT_JITTER_SPAN);
        let facilities = place_near(DEFAULT_CENTER, places(3), &jitter);
        assert_eq!(facilities.len(), 3);
        assert_eq!(facilities[2].title, "Place 2");
        assert_eq!(facilities[2].uri, "https://maps.example/2");
        for facility in &facilities {
            assert!((facility.position.lat - DEFAULT_CENTER.lat).abs() < 0.0075);
            assert!((facility.position.lng - DEFAULT_CENTER.lng).abs() < 0.0075);
        }
    }
}

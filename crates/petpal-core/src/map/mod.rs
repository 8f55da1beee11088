//! Facility map: widget lifetime, marker placement and the per-mount session.

mod placement;
mod session;
mod widget;

pub use placement::{DEFAULT_JITTER_SPAN, JitterSource, RandomJitter, SeededJitter, place_near};
pub use session::{
    FacilityMapSession, MapPhase, MapSessionDeps, MapSessionError, MapSnapshot, MapViewConfig,
    SearchOutcome,
};
pub use widget::{HeadlessMapFactory, MapWidget};

#[cfg(test)]
pub(crate) use widget::testing;

//! The view slot hosting at most one facility map session.

use tokio::sync::Mutex;

use crate::domain::Pet;
use crate::map::{FacilityMapSession, MapSessionDeps, MapSessionError};

/// Holds the current map session, if the map view is mounted.
///
/// Mounting always unmounts the previous session first, so at most one map
/// widget is alive at any time.
pub struct MapSlot {
    deps: MapSessionDeps,
    current: Mutex<Option<FacilityMapSession>>,
}

impl MapSlot {
    pub fn new(deps: MapSessionDeps) -> Self {
        Self {
            deps,
            current: Mutex::new(None),
        }
    }

    /// Mount a fresh session for `pet`, unmounting any existing one first.
    ///
    /// The new session is still locating; follow up with
    /// [`FacilityMapSession::settle`].
    pub async fn install(&self, pet: &Pet) -> FacilityMapSession {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.unmount().await;
        }
        let session = FacilityMapSession::acquire(&self.deps, pet);
        *current = Some(session.clone());
        session
    }

    /// The mounted session, if any.
    pub async fn current(&self) -> Option<FacilityMapSession> {
        self.current.lock().await.clone()
    }

    /// The mounted session, or [`MapSessionError::Released`].
    pub async fn require(&self) -> Result<FacilityMapSession, MapSessionError> {
        self.current().await.ok_or(MapSessionError::Released)
    }

    /// Unmount the current session. Returns whether one was mounted.
    pub async fn unmount(&self) -> bool {
        let previous = self.current.lock().await.take();
        match previous {
            Some(session) => {
                session.unmount().await;
                true
            }
            None => false,
        }
    }
}

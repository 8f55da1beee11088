//! Scoped ownership of a map surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Coordinate;
use crate::ports::{MapInit, MapSurface, MapSurfaceFactory, Marker};

/// A live map widget.
///
/// Acquiring a widget creates its surface; dropping it releases the surface.
/// There is no other way to release, so every exit path (unmount, error,
/// task abort) destroys the surface exactly once.
pub struct MapWidget {
    surface: Box<dyn MapSurface>,
    center: Coordinate,
    zoom: u8,
}

impl MapWidget {
    /// Create a surface from `factory` showing the initial view.
    pub fn acquire(factory: &dyn MapSurfaceFactory, init: &MapInit) -> Self {
        let surface = factory.create(init);
        tracing::debug!(
            target: "petpal.map",
            center = %init.center,
            zoom = init.zoom,
            "Map widget acquired"
        );
        Self {
            surface,
            center: init.center,
            zoom: init.zoom,
        }
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
        self.surface.set_view(center, zoom);
    }

    pub fn show_user_location(&mut self, position: Coordinate) {
        self.surface.show_user_location(position);
    }

    /// Clear the marker layer, then draw `markers`.
    pub fn replace_markers(&mut self, markers: &[Marker]) {
        self.surface.clear_markers();
        for marker in markers {
            self.surface.add_marker(marker);
        }
    }

    pub const fn center(&self) -> Coordinate {
        self.center
    }

    pub const fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl Drop for MapWidget {
    fn drop(&mut self) {
        self.surface.release();
        tracing::debug!(target: "petpal.map", "Map widget released");
    }
}

/// Surface factory for hosts where the map is drawn by a remote client.
///
/// The server keeps the authoritative view state in the session snapshot;
/// the headless surface only tracks how many widgets are alive.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMapFactory {
    live: Arc<AtomicUsize>,
}

impl HeadlessMapFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surfaces created and not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl MapSurfaceFactory for HeadlessMapFactory {
    fn create(&self, _init: &MapInit) -> Box<dyn MapSurface> {
        self.live.fetch_add(1, Ordering::SeqCst);
        Box::new(HeadlessMap {
            live: Arc::clone(&self.live),
            released: false,
        })
    }
}

struct HeadlessMap {
    live: Arc<AtomicUsize>,
    released: bool,
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, _center: Coordinate, _zoom: u8) {}

    fn show_user_location(&mut self, _position: Coordinate) {}

    fn clear_markers(&mut self) {}

    fn add_marker(&mut self, _marker: &Marker) {}

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Recording surface used by session and slot tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// What a recording surface currently shows.
    #[derive(Debug, Clone, Default)]
    pub struct Canvas {
        pub center: Option<Coordinate>,
        pub zoom: Option<u8>,
        pub user_location: Option<Coordinate>,
        pub markers: Vec<Marker>,
        pub clears: usize,
        pub released: bool,
    }

    /// Factory handing out surfaces that draw onto shared canvases.
    #[derive(Clone, Default)]
    pub struct RecordingFactory {
        canvases: Arc<Mutex<Vec<Arc<Mutex<Canvas>>>>>,
    }

    impl RecordingFactory {
        /// Canvas of the most recently created surface.
        pub fn last(&self) -> Canvas {
            let canvases = self.canvases.lock().unwrap();
            canvases.last().map(|c| c.lock().unwrap().clone()).unwrap()
        }

        pub fn created(&self) -> usize {
            self.canvases.lock().unwrap().len()
        }

        pub fn live(&self) -> usize {
            self.canvases
                .lock()
                .unwrap()
                .iter()
                .filter(|c| !c.lock().unwrap().released)
                .count()
        }
    }

    impl MapSurfaceFactory for RecordingFactory {
        fn create(&self, init: &MapInit) -> Box<dyn MapSurface> {
            let canvas = Arc::new(Mutex::new(Canvas {
                center: Some(init.center),
                zoom: Some(init.zoom),
                ..Canvas::default()
            }));
            self.canvases.lock().unwrap().push(Arc::clone(&canvas));
            Box::new(RecordingSurface { canvas })
        }
    }

    struct RecordingSurface {
        canvas: Arc<Mutex<Canvas>>,
    }

    impl MapSurface for RecordingSurface {
        fn set_view(&mut self, center: Coordinate, zoom: u8) {
            let mut canvas = self.canvas.lock().unwrap();
            canvas.center = Some(center);
            canvas.zoom = Some(zoom);
        }

        fn show_user_location(&mut self, position: Coordinate) {
            self.canvas.lock().unwrap().user_location = Some(position);
        }

        fn clear_markers(&mut self) {
            let mut canvas = self.canvas.lock().unwrap();
            canvas.markers.clear();
            canvas.clears += 1;
        }

        fn add_marker(&mut self, marker: &Marker) {
            self.canvas.lock().unwrap().markers.push(marker.clone());
        }

        fn release(&mut self) {
            let mut canvas = self.canvas.lock().unwrap();
            assert!(!canvas.released, "surface released twice");
            canvas.released = true;
        }
    }
}

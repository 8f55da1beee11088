//! Facility map session: one mount of the map view.
//!
//! ```text
//! Uninitialized --acquire widget--> Locating --locate (ok | denied)--> Ready
//!       Ready --category | species | location change--> Searching --apply--> Ready
//! ```
//!
//! Overlapping searches are ordered by a generation counter: each search
//! takes a ticket when it starts and may only apply its results if no newer
//! search has started since. Stale completions are discarded, so the map
//! always shows the results of the most recently issued search.
//!
//! The state mutex is never held across the geolocation or gateway awaits.
//! After [`FacilityMapSession::unmount`] the widget is gone and any search
//! still in flight completes without touching it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::geo::{BASE_TILE_MAX_ZOOM, BASE_TILE_URL};
use crate::domain::{
    Category, Coordinate, DEFAULT_CENTER, DEFAULT_ZOOM, Facility, Pet, RECENTER_ZOOM, Species,
    compose_query, resolve_places,
};
use crate::events::AppEvent;
use crate::ports::{
    AppEventEmitter, FacilitySearchPort, GeolocationPort, MapInit, MapSurfaceFactory, Marker,
};

use super::placement::{JitterSource, place_near};
use super::widget::MapWidget;

/// Lifecycle phase of a map session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapPhase {
    Uninitialized,
    Locating,
    Ready,
    Searching,
    Released,
}

/// Fixed view parameters of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewConfig {
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub recenter_zoom: u8,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            recenter_zoom: RECENTER_ZOOM,
        }
    }
}

/// Collaborators shared by every session of a view slot.
#[derive(Clone)]
pub struct MapSessionDeps {
    pub surfaces: Arc<dyn MapSurfaceFactory>,
    pub search: Arc<dyn FacilitySearchPort>,
    pub jitter: Arc<dyn JitterSource>,
    pub events: Arc<dyn AppEventEmitter>,
    pub view: MapViewConfig,
}

/// Errors from map session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapSessionError {
    #[error("Category {category} is not available for {species}")]
    CategoryUnavailable { category: Category, species: Species },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(Coordinate),

    #[error("No facility at index {0}")]
    FacilityNotFound(usize),

    #[error("Map view is not mounted")]
    Released,
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the map and the list.
    Applied { results: usize },
    /// A newer search started before this one finished.
    Superseded,
    /// The session was unmounted before this search finished.
    Released,
}

/// Read model of the map view for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub phase: MapPhase,
    pub center: Coordinate,
    pub zoom: u8,
    /// Base tile layer template the renderer draws under the markers.
    pub tile_url: String,
    pub max_zoom: u8,
    /// Whether the center came from the user's position.
    pub located: bool,
    pub user_location: Option<Coordinate>,
    pub species: Species,
    pub category: Category,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub query: String,
    pub facilities: Vec<Facility>,
    pub markers: Vec<Marker>,
}

impl MapSnapshot {
    /// Whether the "no places found" panel should be shown.
    pub fn is_empty_state(&self) -> bool {
        !self.loading && self.facilities.is_empty()
    }
}

struct SessionState {
    widget: Option<MapWidget>,
    phase: MapPhase,
    pet_name: String,
    species: Species,
    category: Category,
    center: Coordinate,
    user_location: Option<Coordinate>,
    loading: bool,
    facilities: Vec<Facility>,
    markers: Vec<Marker>,
    issued: u64,
}

impl SessionState {
    fn widget_mut(&mut self) -> Result<&mut MapWidget, MapSessionError> {
        self.widget.as_mut().ok_or(MapSessionError::Released)
    }
}

/// Handle to one mounted map view. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct FacilityMapSession {
    state: Arc<Mutex<SessionState>>,
    search: Arc<dyn FacilitySearchPort>,
    jitter: Arc<dyn JitterSource>,
    events: Arc<dyn AppEventEmitter>,
    view: MapViewConfig,
}

impl FacilityMapSession {
    /// Mount the map view for `pet`: create the widget, locate the user
    /// once, then run the initial search.
    pub async fn mount(deps: &MapSessionDeps, geolocation: &dyn GeolocationPort, pet: &Pet) -> Self {
        let session = Self::acquire(deps, pet);
        session.settle(geolocation).await;
        session
    }

    /// Create the widget on the default view without locating or searching.
    ///
    /// Callers follow up with [`Self::settle`].
    pub fn acquire(deps: &MapSessionDeps, pet: &Pet) -> Self {
        let widget = MapWidget::acquire(
            deps.surfaces.as_ref(),
            &MapInit::new(deps.view.default_center, deps.view.default_zoom),
        );
        let state = SessionState {
            widget: Some(widget),
            phase: MapPhase::Locating,
            pet_name: pet.name.clone(),
            species: pet.species,
            category: Category::default(),
            center: deps.view.default_center,
            user_location: None,
            loading: false,
            facilities: Vec::new(),
            markers: Vec::new(),
            issued: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            search: Arc::clone(&deps.search),
            jitter: Arc::clone(&deps.jitter),
            events: Arc::clone(&deps.events),
            view: deps.view,
        }
    }

    /// Locate the user once, then run the initial search.
    pub async fn settle(&self, geolocation: &dyn GeolocationPort) -> SearchOutcome {
        self.locate(geolocation).await;
        self.search().await
    }

    async fn locate(&self, geolocation: &dyn GeolocationPort) {
        let result = geolocation.locate().await;

        let mut state = self.state.lock().await;
        let Some(widget) = state.widget.as_mut() else {
            return;
        };
        let located = match result {
            Ok(position) => {
                widget.set_view(position, self.view.default_zoom);
                widget.show_user_location(position);
                state.center = position;
                state.user_location = Some(position);
                true
            }
            Err(e) => {
                tracing::debug!(
                    target: "petpal.map",
                    error = %e,
                    fallback = %state.center,
                    "Location unavailable, staying on default center"
                );
                false
            }
        };
        state.phase = MapPhase::Ready;
        let center = state.center;
        drop(state);

        self.events.emit(AppEvent::MapLocated { center, located });
    }

    /// Run one search for the current category, species and center.
    ///
    /// Gateway failures are logged and applied as an empty result set.
    pub async fn search(&self) -> SearchOutcome {
        let (ticket, center, category, query, pet_name) = {
            let mut state = self.state.lock().await;
            if state.widget.is_none() {
                return SearchOutcome::Released;
            }
            state.issued += 1;
            state.loading = true;
            state.phase = MapPhase::Searching;
            (
                state.issued,
                state.center,
                state.category,
                compose_query(state.species, state.category),
                state.pet_name.clone(),
            )
        };

        self.events.emit(AppEvent::MapSearchStarted {
            category,
            query: query.clone(),
        });

        let candidates = match self.search.search(center, &query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    target: "petpal.map",
                    error = %e,
                    query = %query,
                    "Facility search failed, showing no results"
                );
                Vec::new()
            }
        };
        let (places, dropped) = resolve_places(candidates);
        if dropped > 0 {
            tracing::debug!(
                target: "petpal.map",
                dropped,
                "Dropped results without a place reference"
            );
        }
        let facilities = place_near(center, places, self.jitter.as_ref());
        let caption = format!("Recommended for {pet_name}");
        let markers: Vec<Marker> = facilities
            .iter()
            .map(|f| Marker {
                position: f.position,
                title: f.title.clone(),
                uri: f.uri.clone(),
                caption: caption.clone(),
            })
            .collect();

        let mut state = self.state.lock().await;
        if ticket != state.issued {
            tracing::debug!(
                target: "petpal.map",
                ticket,
                latest = state.issued,
                "Discarding superseded search results"
            );
            return SearchOutcome::Superseded;
        }
        let Some(widget) = state.widget.as_mut() else {
            tracing::debug!(target: "petpal.map", "Map released before search completed");
            return SearchOutcome::Released;
        };
        widget.replace_markers(&markers);
        let results = facilities.len();
        state.facilities = facilities;
        state.markers = markers;
        state.loading = false;
        state.phase = MapPhase::Ready;
        drop(state);

        tracing::info!(
            target: "petpal.map",
            category = %category,
            results,
            "Facility search applied"
        );
        self.events.emit(AppEvent::MapSearchCompleted {
            category,
            query,
            results,
        });
        SearchOutcome::Applied { results }
    }

    /// Select a filter category and search again, even if it is unchanged.
    pub async fn select_category(
        &self,
        category: Category,
    ) -> Result<SearchOutcome, MapSessionError> {
        {
            let mut state = self.state.lock().await;
            state.widget_mut()?;
            if !category.is_valid_for(state.species) {
                return Err(MapSessionError::CategoryUnavailable {
                    category,
                    species: state.species,
                });
            }
            state.category = category;
        }
        Ok(self.search().await)
    }

    /// Follow a change of the active pet.
    ///
    /// Searches again only when the species changed; an invalid category is
    /// reset to the default first.
    pub async fn set_active_pet(&self, pet: &Pet) -> Result<Option<SearchOutcome>, MapSessionError> {
        if self.adopt_pet(pet).await? {
            Ok(Some(self.search().await))
        } else {
            Ok(None)
        }
    }

    /// Take over `pet` as the subject of the view without searching.
    ///
    /// Returns `true` when the species changed; the caller then owes a
    /// [`Self::search`].
    pub async fn adopt_pet(&self, pet: &Pet) -> Result<bool, MapSessionError> {
        let mut state = self.state.lock().await;
        state.widget_mut()?;
        state.pet_name.clone_from(&pet.name);
        if state.species == pet.species {
            return Ok(false);
        }
        state.species = pet.species;
        state.category = state.category.normalized_for(pet.species);
        Ok(true)
    }

    /// Follow a new user position. Searches again when it moved.
    pub async fn update_location(
        &self,
        position: Coordinate,
    ) -> Result<Option<SearchOutcome>, MapSessionError> {
        if !position.is_valid() {
            return Err(MapSessionError::InvalidCoordinate(position));
        }
        {
            let mut state = self.state.lock().await;
            let moved = state.center != position;
            let widget = state.widget_mut()?;
            widget.show_user_location(position);
            if moved {
                widget.set_view(position, self.view.default_zoom);
            }
            state.user_location = Some(position);
            if !moved {
                return Ok(None);
            }
            state.center = position;
        }
        Ok(Some(self.search().await))
    }

    /// View the last known position again, without searching.
    pub async fn recenter(&self) -> Result<Coordinate, MapSessionError> {
        let mut state = self.state.lock().await;
        let center = state.center;
        state.widget_mut()?.set_view(center, self.view.recenter_zoom);
        Ok(center)
    }

    /// Link to open for a list entry or marker.
    pub async fn facility_link(&self, index: usize) -> Result<String, MapSessionError> {
        let state = self.state.lock().await;
        state
            .facilities
            .get(index)
            .map(|f| f.uri.clone())
            .ok_or(MapSessionError::FacilityNotFound(index))
    }

    pub async fn snapshot(&self) -> MapSnapshot {
        let state = self.state.lock().await;
        let (phase, center, zoom) = match state.widget.as_ref() {
            Some(widget) => (state.phase, widget.center(), widget.zoom()),
            None => (MapPhase::Released, state.center, self.view.default_zoom),
        };
        MapSnapshot {
            phase,
            center,
            zoom,
            tile_url: BASE_TILE_URL.to_string(),
            max_zoom: BASE_TILE_MAX_ZOOM,
            located: state.user_location.is_some(),
            user_location: state.user_location,
            species: state.species,
            category: state.category,
            categories: Category::available_for(state.species).to_vec(),
            loading: state.loading,
            query: compose_query(state.species, state.category),
            facilities: state.facilities.clone(),
            markers: state.markers.clone(),
        }
    }

    pub async fn is_mounted(&self) -> bool {
        self.state.lock().await.widget.is_some()
    }

    /// Release the widget. Idempotent.
    pub async fn unmount(&self) {
        let widget = {
            let mut state = self.state.lock().await;
            state.loading = false;
            state.phase = MapPhase::Released;
            state.widget.take()
        };
        if let Some(widget) = widget {
            drop(widget);
            self.events.emit(AppEvent::MapReleased);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacilityCandidate, PetDraft, PetId, PlaceReference};
    use crate::map::placement::SeededJitter;
    use crate::map::widget::testing::RecordingFactory;
    use crate::ports::{
        DeniedLocation, FixedLocation, GatewayError, GatewayResult, RecordingEmitter,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::oneshot;

    /// Search port returning queued responses and recording its calls.
    #[derive(Default)]
    struct ScriptedSearch {
        responses: StdMutex<VecDeque<GatewayResult<Vec<FacilityCandidate>>>>,
        calls: StdMutex<Vec<(Coordinate, String)>>,
    }

    impl ScriptedSearch {
        fn respond(&self, response: GatewayResult<Vec<FacilityCandidate>>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> Vec<(Coordinate, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FacilitySearchPort for ScriptedSearch {
        async fn search(
            &self,
            center: Coordinate,
            query: &str,
        ) -> GatewayResult<Vec<FacilityCandidate>> {
            self.calls.lock().unwrap().push((center, query.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Search port whose calls block until the test releases them.
    #[derive(Default)]
    struct GatedSearch {
        gates: StdMutex<VecDeque<oneshot::Receiver<Vec<FacilityCandidate>>>>,
    }

    impl GatedSearch {
        fn gate(&self) -> oneshot::Sender<Vec<FacilityCandidate>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl FacilitySearchPort for GatedSearch {
        async fn search(
            &self,
            _center: Coordinate,
            _query: &str,
        ) -> GatewayResult<Vec<FacilityCandidate>> {
            let gate = self.gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or_default()),
                None => Ok(Vec::new()),
            }
        }
    }

    fn pet(name: &str, species: Species) -> Pet {
        PetDraft {
            name: name.to_string(),
            species,
            ..PetDraft::default()
        }
        .into_pet(PetId::from(name))
        .unwrap()
    }

    fn place(i: usize) -> FacilityCandidate {
        FacilityCandidate::with_place(PlaceReference {
            title: format!("Place {i}"),
            uri: format!("https://maps.example/{i}"),
        })
    }

    fn valid(n: usize) -> Vec<FacilityCandidate> {
        (0..n).map(place).collect()
    }

    struct Harness {
        deps: MapSessionDeps,
        surfaces: RecordingFactory,
        events: Arc<RecordingEmitter>,
    }

    fn harness(search: Arc<dyn FacilitySearchPort>) -> Harness {
        let surfaces = RecordingFactory::default();
        let events = Arc::new(RecordingEmitter::default());
        let deps = MapSessionDeps {
            surfaces: Arc::new(surfaces.clone()),
            search,
            jitter: Arc::new(SeededJitter::new(42, 0.015)),
            events: events.clone(),
            view: MapViewConfig::default(),
        };
        Harness {
            deps,
            surfaces,
            events,
        }
    }

    #[tokio::test]
    async fn test_cat_hotel_scenario_draws_only_valid_results() {
        let search = Arc::new(ScriptedSearch::default());
        search.respond(Ok(Vec::new()));
        let mut hotel = valid(3);
        hotel.insert(1, FacilityCandidate::unresolved());
        search.respond(Ok(hotel));
        let h = harness(search.clone());

        let cookie = pet("Cookie", Species::Cat);
        let session = FacilityMapSession::mount(&h.deps, &DeniedLocation, &cookie).await;
        let outcome = session.select_category(Category::Hotel).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Applied { results: 3 });
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.facilities.len(), 3);
        assert_eq!(snapshot.markers.len(), 3);
        assert!(!snapshot.loading);
        assert_eq!(h.surfaces.last().markers.len(), 3);
        assert_eq!(search.calls()[1].1, "cat-only hotel");

        // loading went true -> false for the hotel search
        let names = h.events.names();
        assert_eq!(
            &names[names.len() - 2..],
            &["map_search_started", "map_search_completed"]
        );
    }

    #[tokio::test]
    async fn test_every_marker_matches_a_list_entry() {
        let search = Arc::new(ScriptedSearch::default());
        search.respond(Ok(vec![
            place(0),
            FacilityCandidate::unresolved(),
            place(1),
            FacilityCandidate::unresolved(),
        ]));
        let h = harness(search);

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        let snapshot = session.snapshot().await;

        assert_eq!(snapshot.markers.len(), snapshot.facilities.len());
        for (marker, facility) in snapshot.markers.iter().zip(&snapshot.facilities) {
            assert_eq!(marker.uri, facility.uri);
            assert_eq!(marker.position, facility.position);
            assert_eq!(marker.caption, "Recommended for Miho");
        }
    }

    #[tokio::test]
    async fn test_geolocation_denied_searches_default_center() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        let snapshot = session.snapshot().await;

        assert_eq!(snapshot.center, DEFAULT_CENTER);
        assert!(!snapshot.located);
        assert_eq!(snapshot.phase, MapPhase::Ready);
        assert_eq!(h.surfaces.last().center, Some(DEFAULT_CENTER));
        assert!(h.surfaces.last().user_location.is_none());
        assert_eq!(
            search.calls(),
            vec![(DEFAULT_CENTER, "dog-only hospital".to_string())]
        );
    }

    #[tokio::test]
    async fn test_geolocation_success_recenters_and_marks_user() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());
        let busan = Coordinate::new(35.1796, 129.0756);

        let session =
            FacilityMapSession::mount(&h.deps, &FixedLocation(busan), &pet("Miho", Species::Dog))
                .await;

        let canvas = h.surfaces.last();
        assert_eq!(canvas.center, Some(busan));
        assert_eq!(canvas.zoom, Some(DEFAULT_ZOOM));
        assert_eq!(canvas.user_location, Some(busan));
        assert!(session.snapshot().await.located);
        assert_eq!(search.calls()[0].0, busan);
    }

    #[tokio::test]
    async fn test_provider_error_yields_empty_state() {
        let search = Arc::new(ScriptedSearch::default());
        search.respond(Ok(valid(2)));
        search.respond(Err(GatewayError::Status { status: 500 }));
        let h = harness(search);

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        assert_eq!(session.snapshot().await.facilities.len(), 2);

        let outcome = session.select_category(Category::Park).await.unwrap();
        assert_eq!(outcome, SearchOutcome::Applied { results: 0 });
        let snapshot = session.snapshot().await;
        assert!(snapshot.is_empty_state());
        assert!(h.surfaces.last().markers.is_empty());
    }

    #[tokio::test]
    async fn test_reselecting_category_does_not_accumulate_markers() {
        let search = Arc::new(ScriptedSearch::default());
        search.respond(Ok(valid(3)));
        search.respond(Ok(valid(3)));
        search.respond(Ok(valid(3)));
        let h = harness(search.clone());

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        session.select_category(Category::Park).await.unwrap();
        let first = session.snapshot().await;
        session.select_category(Category::Park).await.unwrap();
        let second = session.snapshot().await;

        assert_eq!(search.calls().len(), 3);
        assert_eq!(first.facilities.len(), second.facilities.len());
        let titles = |s: &MapSnapshot| s.facilities.iter().map(|f| f.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&first), titles(&second));
        assert_eq!(h.surfaces.last().markers.len(), 3);
    }

    #[tokio::test]
    async fn test_species_switch_resets_invalid_category_and_searches() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        session.select_category(Category::Playground).await.unwrap();

        let outcome = session
            .set_active_pet(&pet("Cookie", Species::Cat))
            .await
            .unwrap();

        assert!(matches!(outcome, Some(SearchOutcome::Applied { .. })));
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.category, Category::Hospital);
        assert_eq!(
            snapshot.categories,
            vec![Category::Hospital, Category::Hotel, Category::Sitter]
        );
        assert_eq!(search.calls().last().unwrap().1, "cat-only hospital");
    }

    #[tokio::test]
    async fn test_same_species_switch_keeps_category_without_search() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());

        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        session.select_category(Category::Park).await.unwrap();
        let outcome = session
            .set_active_pet(&pet("Choco", Species::Dog))
            .await
            .unwrap();

        assert_eq!(outcome, None);
        assert_eq!(session.snapshot().await.category, Category::Park);
        assert_eq!(search.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_category_outside_species_set_is_rejected() {
        let h = harness(Arc::new(ScriptedSearch::default()));
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Cookie", Species::Cat))
                .await;

        let err = session.select_category(Category::Park).await.unwrap_err();
        assert_eq!(
            err,
            MapSessionError::CategoryUnavailable {
                category: Category::Park,
                species: Species::Cat
            }
        );
        assert_eq!(session.snapshot().await.category, Category::Hospital);
    }

    #[tokio::test]
    async fn test_location_change_searches_and_recenter_does_not() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        let moved = Coordinate::new(37.55, 127.0);
        let outcome = session.update_location(moved).await.unwrap();
        assert!(outcome.is_some());
        assert_eq!(session.update_location(moved).await.unwrap(), None);
        assert_eq!(search.calls().len(), 2);

        let center = session.recenter().await.unwrap();
        assert_eq!(center, moved);
        assert_eq!(search.calls().len(), 2);
        let canvas = h.surfaces.last();
        assert_eq!(canvas.center, Some(moved));
        assert_eq!(canvas.zoom, Some(RECENTER_ZOOM));

        assert!(matches!(
            session.update_location(Coordinate::new(f64::NAN, 0.0)).await,
            Err(MapSessionError::InvalidCoordinate(_))
        ));
    }

    #[tokio::test]
    async fn test_location_change_moves_the_view_with_the_search() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        session.recenter().await.unwrap();

        let moved = Coordinate::new(35.2, 129.1);
        session.update_location(moved).await.unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.center, moved);
        assert_eq!(snapshot.zoom, DEFAULT_ZOOM);
        assert_eq!(snapshot.user_location, Some(moved));
        assert_eq!(search.calls()[1].0, moved);
        let canvas = h.surfaces.last();
        assert_eq!(canvas.center, Some(moved));
        assert_eq!(canvas.zoom, Some(DEFAULT_ZOOM));
    }

    #[tokio::test]
    async fn test_snapshot_carries_base_tile_layer() {
        let h = harness(Arc::new(ScriptedSearch::default()));
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.tile_url, BASE_TILE_URL);
        assert_eq!(snapshot.max_zoom, 19);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["tileUrl"], BASE_TILE_URL);
    }

    #[tokio::test]
    async fn test_adopt_pet_defers_the_search() {
        let search = Arc::new(ScriptedSearch::default());
        let h = harness(search.clone());
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;
        session.select_category(Category::Playground).await.unwrap();

        assert!(session.adopt_pet(&pet("Cookie", Species::Cat)).await.unwrap());
        assert_eq!(search.calls().len(), 2);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.category, Category::Hospital);
        assert_eq!(snapshot.query, "cat-only hospital");

        assert!(!session.adopt_pet(&pet("Nabi", Species::Cat)).await.unwrap());
        session.unmount().await;
        assert_eq!(
            session.adopt_pet(&pet("Miho", Species::Dog)).await,
            Err(MapSessionError::Released)
        );
    }

    #[tokio::test]
    async fn test_facility_link() {
        let search = Arc::new(ScriptedSearch::default());
        search.respond(Ok(valid(2)));
        let h = harness(search);
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        assert_eq!(
            session.facility_link(1).await.unwrap(),
            "https://maps.example/1"
        );
        assert_eq!(
            session.facility_link(5).await,
            Err(MapSessionError::FacilityNotFound(5))
        );
    }

    #[tokio::test]
    async fn test_superseded_search_never_overwrites_newer_results() {
        let search = Arc::new(GatedSearch::default());
        let h = harness(search.clone());

        let initial = search.gate();
        initial.send(Vec::new()).unwrap();
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        let older_gate = search.gate();
        let newer_gate = search.gate();
        let older = tokio::spawn({
            let session = session.clone();
            async move { session.select_category(Category::Park).await }
        });
        // Make sure the older search has taken its ticket first.
        while search.gates.lock().unwrap().len() > 1 {
            tokio::task::yield_now().await;
        }
        let newer = tokio::spawn({
            let session = session.clone();
            async move { session.select_category(Category::Playground).await }
        });
        while !search.gates.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }

        // Newer resolves first, then the older one.
        newer_gate.send(valid(1)).unwrap();
        assert_eq!(
            newer.await.unwrap().unwrap(),
            SearchOutcome::Applied { results: 1 }
        );
        older_gate.send(valid(4)).unwrap();
        assert_eq!(older.await.unwrap().unwrap(), SearchOutcome::Superseded);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.facilities.len(), 1);
        assert!(!snapshot.loading);
        assert_eq!(h.surfaces.last().markers.len(), 1);
    }

    #[tokio::test]
    async fn test_late_completion_after_unmount_is_a_no_op() {
        let search = Arc::new(GatedSearch::default());
        let h = harness(search.clone());

        search.gate().send(Vec::new()).unwrap();
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        let gate = search.gate();
        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.select_category(Category::Park).await }
        });
        while !search.gates.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }

        session.unmount().await;
        assert_eq!(h.surfaces.live(), 0);
        gate.send(valid(2)).unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), SearchOutcome::Released);
        let canvas = h.surfaces.last();
        assert!(canvas.released);
        assert!(canvas.markers.is_empty());
        assert_eq!(session.snapshot().await.phase, MapPhase::Released);
        assert_eq!(session.recenter().await, Err(MapSessionError::Released));
    }

    #[tokio::test]
    async fn test_unmount_is_idempotent() {
        let h = harness(Arc::new(ScriptedSearch::default()));
        let session =
            FacilityMapSession::mount(&h.deps, &DeniedLocation, &pet("Miho", Species::Dog)).await;

        session.unmount().await;
        session.unmount().await;

        assert!(!session.is_mounted().await);
        assert_eq!(h.surfaces.created(), 1);
        let released = h
            .events
            .names()
            .into_iter()
            .filter(|n| *n == "map_released")
            .count();
        assert_eq!(released, 1);
    }
}

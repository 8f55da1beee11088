//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    ActivityPeriod, ActivitySeries, CalendarEvent, CalendarMonth, InsuranceSummary, Meetup,
    MonthKey, NewPetRecord, Pet, PetDraft, PetId, PetRecord,
};
use crate::map::{FacilityMapSession, MapSessionDeps, MapSessionError, MapSnapshot};
use crate::ports::{AppEventEmitter, CoreError, GeolocationPort, HealthAdvisorPort};
use crate::seed;

use super::health_insights::{HealthInsight, HealthInsightService};
use super::map_slot::MapSlot;
use super::pet_registry::{PetCommand, PetRegistry, RegistrySnapshot};

/// The active pet with display fields computed for today.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetProfile {
    #[serde(flatten)]
    pub pet: Pet,
    pub age_years: f64,
    pub type_label: String,
}

/// The calendar view: a month grid plus the active pet's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub pet_name: String,
    pub month: CalendarMonth,
    /// Targets of the header's previous/next arrows.
    pub previous: MonthKey,
    pub next: MonthKey,
    pub events: Vec<CalendarEvent>,
}

/// The core application facade.
///
/// `AppCore` owns the pet registry and the health log, and routes every
/// registry change to the mounted map session so it follows the active pet.
pub struct AppCore {
    registry: RwLock<PetRegistry>,
    records: RwLock<Vec<PetRecord>>,
    insights: HealthInsightService,
    map: MapSlot,
    events: Arc<dyn AppEventEmitter>,
}

impl AppCore {
    /// Create an `AppCore` over `pets`.
    pub fn new(
        pets: Vec<Pet>,
        advisor: Arc<dyn HealthAdvisorPort>,
        map_deps: MapSessionDeps,
    ) -> Result<Self, CoreError> {
        let registry = PetRegistry::new(pets)?;
        let events = Arc::clone(&map_deps.events);
        Ok(Self {
            registry: RwLock::new(registry),
            records: RwLock::new(Vec::new()),
            insights: HealthInsightService::new(advisor),
            map: MapSlot::new(map_deps),
            events,
        })
    }

    /// Create an `AppCore` loaded with the starter data.
    pub fn seeded(
        advisor: Arc<dyn HealthAdvisorPort>,
        map_deps: MapSessionDeps,
    ) -> Result<Self, CoreError> {
        let core = Self::new(seed::pets(), advisor, map_deps)?;
        Ok(core.with_records(seed::records()))
    }

    /// Replace the health log.
    #[must_use]
    pub fn with_records(mut self, records: Vec<PetRecord>) -> Self {
        self.records = RwLock::new(records);
        self
    }

    /// Access the map view slot.
    pub const fn map(&self) -> &MapSlot {
        &self.map
    }

    // ========== Pets ==========

    pub async fn pets(&self) -> RegistrySnapshot {
        self.registry.read().await.snapshot()
    }

    pub async fn active_pet(&self) -> Pet {
        self.registry.read().await.active().clone()
    }

    /// The active pet with its age as of `today`.
    pub async fn active_profile(&self, today: NaiveDate) -> PetProfile {
        let pet = self.active_pet().await;
        PetProfile {
            age_years: pet.age_years(today),
            type_label: pet.type_label(),
            pet,
        }
    }

    /// Find a pet by id.
    pub async fn pet(&self, id: &PetId) -> Result<Pet, CoreError> {
        self.registry
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("pet {id}")))
    }

    /// Add a pet from a draft; it becomes active.
    pub async fn add_pet(&self, draft: PetDraft) -> Result<Pet, CoreError> {
        self.apply(PetCommand::Add(draft)).await?;
        Ok(self.active_pet().await)
    }

    /// Replace a pet wholesale.
    pub async fn update_pet(&self, pet: Pet) -> Result<Pet, CoreError> {
        let id = pet.id.clone();
        self.apply(PetCommand::Replace(pet)).await?;
        self.pet(&id).await
    }

    /// Make a pet active.
    pub async fn select_pet(&self, id: PetId) -> Result<Pet, CoreError> {
        self.apply(PetCommand::Select(id)).await?;
        Ok(self.active_pet().await)
    }

    async fn apply(&self, command: PetCommand) -> Result<(), CoreError> {
        // The map adopts the new active pet under the registry lock, so a
        // mounted session sees pet changes in registry order.
        let (events, pending) = {
            let mut registry = self.registry.write().await;
            let events = registry.apply(command)?;
            let pending = self.adopt_active_pet(registry.active()).await;
            (events, pending)
        };
        for event in events {
            self.events.emit(event);
        }
        if let Some(session) = pending {
            session.search().await;
        }
        Ok(())
    }

    /// Hand the active pet to a mounted map session.
    ///
    /// Returns the session when its species changed and it must search again.
    async fn adopt_active_pet(&self, active: &Pet) -> Option<FacilityMapSession> {
        let session = self.map.current().await?;
        match session.adopt_pet(active).await {
            Ok(true) => Some(session),
            Ok(false) | Err(MapSessionError::Released) => None,
            Err(e) => {
                tracing::warn!(target: "petpal.map", error = %e, "Map could not follow active pet");
                None
            }
        }
    }

    // ========== Health ==========

    /// Symptom advice for the active pet.
    pub async fn ask_insight(&self, symptoms: &str) -> Result<HealthInsight, CoreError> {
        let pet = self.active_pet().await;
        self.insights.ask(&pet, symptoms).await
    }

    /// Symptom advice for a specific pet.
    pub async fn ask_insight_for(
        &self,
        id: &PetId,
        symptoms: &str,
    ) -> Result<HealthInsight, CoreError> {
        let pet = self.pet(id).await?;
        self.insights.ask(&pet, symptoms).await
    }

    /// Health log of the active pet, newest first.
    pub async fn records(&self) -> Vec<PetRecord> {
        let active = self.active_pet().await.id;
        let mut records: Vec<PetRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.pet_id == active)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Append to the active pet's health log.
    pub async fn add_record(&self, record: NewPetRecord) -> Result<PetRecord, CoreError> {
        let value = record.value.trim();
        if value.is_empty() {
            return Err(CoreError::Validation(
                "Record value cannot be empty".to_string(),
            ));
        }
        let record = PetRecord {
            id: format!("rec-{}", Uuid::new_v4().simple()),
            pet_id: self.active_pet().await.id,
            kind: record.kind,
            date: record.date,
            value: value.to_string(),
            note: record
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };
        tracing::debug!(
            target: "petpal.registry",
            pet_id = %record.pet_id,
            kind = ?record.kind,
            "Health record added"
        );
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    pub fn activity(&self, period: ActivityPeriod) -> ActivitySeries {
        seed::activity(period)
    }

    // ========== Listings ==========

    pub fn meetups(&self) -> Vec<Meetup> {
        seed::meetups()
    }

    pub async fn insurance(&self) -> InsuranceSummary {
        seed::insurance(&self.active_pet().await)
    }

    /// Calendar for `year`-`month`, defaulting to the current month.
    pub async fn calendar(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<CalendarView, CoreError> {
        let today = Local::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());
        let month =
            CalendarMonth::new(year, month).map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(CalendarView {
            pet_name: self.active_pet().await.name,
            previous: month.previous(),
            next: month.next(),
            month,
            events: seed::schedule(),
        })
    }

    // ========== Map ==========

    /// Mount the map view for the active pet and return its first snapshot.
    pub async fn mount_map(&self, geolocation: &dyn GeolocationPort) -> MapSnapshot {
        let session = {
            let registry = self.registry.read().await;
            self.map.install(registry.active()).await
        };
        session.settle(geolocation).await;
        session.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Category, Coordinate, FacilityCandidate, PlaceReference, RecordKind, Species,
    };
    use crate::map::testing::RecordingFactory;
    use crate::map::{MapViewConfig, SeededJitter};
    use crate::ports::{
        DeniedLocation, FacilitySearchPort, GatewayResult, MockHealthAdvisorPort,
        RecordingEmitter,
    };
    use crate::events::AppEvent;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct QueryLog {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FacilitySearchPort for QueryLog {
        async fn search(
            &self,
            _center: Coordinate,
            query: &str,
        ) -> GatewayResult<Vec<FacilityCandidate>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(vec![FacilityCandidate::with_place(PlaceReference {
                title: "Vet".to_string(),
                uri: "https://maps.example/vet".to_string(),
            })])
        }
    }

    struct Fixture {
        core: AppCore,
        search: Arc<QueryLog>,
        events: Arc<RecordingEmitter>,
    }

    fn fixture(advisor: MockHealthAdvisorPort) -> Fixture {
        let search = Arc::new(QueryLog::default());
        let events = Arc::new(RecordingEmitter::default());
        let deps = MapSessionDeps {
            surfaces: Arc::new(RecordingFactory::default()),
            search: search.clone(),
            jitter: Arc::new(SeededJitter::new(9, 0.015)),
            events: events.clone(),
            view: MapViewConfig::default(),
        };
        let core = AppCore::seeded(Arc::new(advisor), deps).unwrap();
        Fixture {
            core,
            search,
            events,
        }
    }

    #[tokio::test]
    async fn test_empty_pet_list_is_rejected() {
        let deps = MapSessionDeps {
            surfaces: Arc::new(RecordingFactory::default()),
            search: Arc::new(QueryLog::default()),
            jitter: Arc::new(SeededJitter::new(9, 0.015)),
            events: Arc::new(RecordingEmitter::default()),
            view: MapViewConfig::default(),
        };
        let result = AppCore::new(vec![], Arc::new(MockHealthAdvisorPort::new()), deps);
        assert!(matches!(result, Err(CoreError::Registry(_))));
    }

    #[tokio::test]
    async fn test_add_pet_emits_and_selects() {
        let f = fixture(MockHealthAdvisorPort::new());
        let pet = f
            .core
            .add_pet(PetDraft {
                name: "Bori".to_string(),
                ..PetDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(f.core.active_pet().await.id, pet.id);
        assert_eq!(f.core.pets().await.pets.len(), 3);
        assert_eq!(f.events.names(), vec!["pet_added", "active_pet_changed"]);
    }

    #[tokio::test]
    async fn test_select_unknown_pet_is_not_found() {
        let f = fixture(MockHealthAdvisorPort::new());
        let err = f.core.select_pet(PetId::from("pet-42")).await.unwrap_err();
        assert!(matches!(err, CoreError::Registry(_)));
        assert_eq!(f.core.active_pet().await.name, "Miho");
    }

    #[tokio::test]
    async fn test_mounted_map_follows_species_change() {
        let f = fixture(MockHealthAdvisorPort::new());
        f.core.mount_map(&DeniedLocation).await;
        let session = f.core.map().require().await.unwrap();
        session.select_category(Category::Park).await.unwrap();

        f.core.select_pet(PetId::from("pet-2")).await.unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.species, Species::Cat);
        assert_eq!(snapshot.category, Category::Hospital);
        let queries = f.search.queries.lock().unwrap().clone();
        assert_eq!(
            queries,
            vec!["dog-only hospital", "dog-only park", "cat-only hospital"]
        );
    }

    #[tokio::test]
    async fn test_editing_active_pet_species_resets_map_category() {
        let f = fixture(MockHealthAdvisorPort::new());
        f.core.mount_map(&DeniedLocation).await;
        let session = f.core.map().require().await.unwrap();
        session.select_category(Category::Playground).await.unwrap();

        let mut miho = f.core.active_pet().await;
        miho.species = Species::Cat;
        let updated = f.core.update_pet(miho).await.unwrap();
        assert_eq!(updated.species, Species::Cat);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.species, Species::Cat);
        assert_eq!(snapshot.category, Category::Hospital);
        let queries = f.search.queries.lock().unwrap().clone();
        assert_eq!(
            queries,
            vec!["dog-only hospital", "dog-only playground", "cat-only hospital"]
        );
        assert!(f.events.names().contains(&"pet_updated"));
    }

    /// Emitter that blocks its thread the first time a cat becomes active.
    #[derive(Default)]
    struct StallOnCat {
        stalled: AtomicBool,
    }

    impl AppEventEmitter for StallOnCat {
        fn emit(&self, event: AppEvent) {
            if matches!(
                event,
                AppEvent::ActivePetChanged {
                    species: Species::Cat,
                    ..
                }
            ) && !self.stalled.swap(true, Ordering::SeqCst)
            {
                std::thread::sleep(Duration::from_millis(300));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_overlapping_selects_leave_map_on_active_pet() {
        let deps = MapSessionDeps {
            surfaces: Arc::new(RecordingFactory::default()),
            search: Arc::new(QueryLog::default()),
            jitter: Arc::new(SeededJitter::new(9, 0.015)),
            events: Arc::new(StallOnCat::default()),
            view: MapViewConfig::default(),
        };
        let core = Arc::new(AppCore::seeded(Arc::new(MockHealthAdvisorPort::new()), deps).unwrap());
        core.mount_map(&DeniedLocation).await;

        let to_cat = tokio::spawn({
            let core = Arc::clone(&core);
            async move { core.select_pet(PetId::from("pet-2")).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        core.select_pet(PetId::from("pet-1")).await.unwrap();
        to_cat.await.unwrap().unwrap();

        let active = core.active_pet().await;
        let snapshot = core.map().require().await.unwrap().snapshot().await;
        assert_eq!(active.species, Species::Dog);
        assert_eq!(snapshot.species, active.species);
        assert_eq!(snapshot.query, "dog-only hospital");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_active_pet() {
        let f = fixture(MockHealthAdvisorPort::new());
        let miho = f.core.records().await;
        assert!(!miho.is_empty());
        assert!(miho.iter().all(|r| r.pet_id.as_str() == "pet-1"));
        assert!(miho.windows(2).all(|w| w[0].date >= w[1].date));

        let added = f
            .core
            .add_record(NewPetRecord {
                kind: RecordKind::Weight,
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                value: " 4.9kg ".to_string(),
                note: Some("  ".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(added.value, "4.9kg");
        assert!(added.note.is_none());
        assert_eq!(f.core.records().await[0], added);

        f.core.select_pet(PetId::from("pet-2")).await.unwrap();
        assert!(f.core.records().await.iter().all(|r| r.id != added.id));
    }

    #[tokio::test]
    async fn test_blank_record_value_is_rejected() {
        let f = fixture(MockHealthAdvisorPort::new());
        let result = f
            .core
            .add_record(NewPetRecord {
                kind: RecordKind::Water,
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                value: String::new(),
                note: None,
            })
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_insight_uses_active_pet_type() {
        let mut advisor = MockHealthAdvisorPort::new();
        advisor
            .expect_advise()
            .withf(|pet_type, _| pet_type == "Poodle (Dog)")
            .returning(|_, _| Ok(Some("Rest and hydrate.".to_string())));
        let f = fixture(advisor);

        let insight = f.core.ask_insight("limping").await.unwrap();
        assert_eq!(insight.text, "Rest and hydrate.");
    }

    #[tokio::test]
    async fn test_calendar_and_profile() {
        let f = fixture(MockHealthAdvisorPort::new());
        let view = f.core.calendar(Some(2026), Some(2)).await.unwrap();
        assert_eq!(view.month.days.len(), 28);
        assert_eq!(view.previous, MonthKey::new(2026, 1));
        assert_eq!(view.next, MonthKey::new(2026, 3));
        assert_eq!(view.pet_name, "Miho");
        assert_eq!(view.events.len(), 2);
        assert!(matches!(
            f.core.calendar(Some(2026), Some(13)).await,
            Err(CoreError::Validation(_))
        ));

        let profile = f
            .core
            .active_profile(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
            .await;
        assert!((profile.age_years - 7.0).abs() < f64::EPSILON);
        assert_eq!(profile.type_label, "Poodle (Dog)");
    }
}

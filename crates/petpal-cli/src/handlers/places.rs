//! Places command handler - facility search around a position.

use petpal_core::map::MapSnapshot;
use petpal_core::ports::{DeniedLocation, FixedLocation, GeolocationPort};
use petpal_core::{Category, Coordinate, CoreError, PetId};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_coordinate, print_separator, truncate_string};

/// Arguments for the places command.
#[derive(Debug, Default)]
pub struct PlacesArgs {
    /// Pet to search for; it becomes the active pet.
    pub pet: Option<String>,
    pub category: Option<String>,
    /// Search center; the default center when absent.
    pub position: Option<Coordinate>,
}

/// Mount a map session, search, print the results and release the session.
pub async fn execute(ctx: &CliContext, args: PlacesArgs) -> Result<(), CliError> {
    let snapshot = search(ctx, args).await?;
    print_results(&snapshot);
    Ok(())
}

async fn search(ctx: &CliContext, args: PlacesArgs) -> Result<MapSnapshot, CliError> {
    let app = ctx.app();
    if let Some(id) = args.pet {
        app.select_pet(PetId::new(id)).await?;
    }
    let species = app.active_pet().await.species;

    let category = match args.category.as_deref() {
        Some(raw) => {
            let category = Category::parse(raw)
                .ok_or_else(|| CliError::Arguments(format!("Unknown category '{raw}'")))?;
            if !category.is_valid_for(species) {
                let offered: Vec<&str> = Category::available_for(species)
                    .iter()
                    .map(Category::as_str)
                    .collect();
                return Err(CliError::Arguments(format!(
                    "{category} is not offered for {species} (choose from {})",
                    offered.join(", ")
                )));
            }
            Some(category)
        }
        None => None,
    };

    let geolocation: Box<dyn GeolocationPort> = match args.position {
        Some(position) => Box::new(FixedLocation(position)),
        None => Box::new(DeniedLocation),
    };
    let mut snapshot = app.mount_map(geolocation.as_ref()).await;

    if let Some(category) = category.filter(|c| *c != snapshot.category) {
        let session = app.map().require().await.map_err(CoreError::from)?;
        session
            .select_category(category)
            .await
            .map_err(CoreError::from)?;
        snapshot = session.snapshot().await;
    }

    app.map().unmount().await;
    Ok(snapshot)
}

fn print_results(snapshot: &MapSnapshot) {
    println!(
        "{} near {}{}",
        snapshot.category.label(),
        format_coordinate(snapshot.center),
        if snapshot.located { "" } else { " (default location)" }
    );
    println!("Query: {}", snapshot.query);
    println!();

    if snapshot.is_empty_state() {
        println!("No places found.");
        return;
    }

    println!("{:<3} {:<36} {:<20} Link", "#", "Name", "Approx. position");
    print_separator(100);
    for (index, facility) in snapshot.facilities.iter().enumerate() {
        println!(
            "{:<3} {:<36} {:<20} {}",
            index + 1,
            truncate_string(&facility.title, 36),
            format_coordinate(facility.position),
            facility.uri
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use async_trait::async_trait;
    use petpal_core::map::SeededJitter;
    use petpal_core::ports::{FacilitySearchPort, GatewayResult, HealthAdvisorPort};
    use petpal_core::{FacilityCandidate, PlaceReference, Settings};
    use std::sync::{Arc, Mutex};

    struct SilentAdvisor;

    #[async_trait]
    impl HealthAdvisorPort for SilentAdvisor {
        async fn advise(&self, _pet_type: &str, _symptoms: &str) -> GatewayResult<Option<String>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct LoggingSearch {
        calls: Mutex<Vec<(Coordinate, String)>>,
    }

    #[async_trait]
    impl FacilitySearchPort for LoggingSearch {
        async fn search(
            &self,
            center: Coordinate,
            query: &str,
        ) -> GatewayResult<Vec<FacilityCandidate>> {
            self.calls.lock().unwrap().push((center, query.to_string()));
            Ok(vec![
                FacilityCandidate::with_place(PlaceReference {
                    title: format!("{query} one"),
                    uri: "https://maps.google.com/?cid=1".to_string(),
                }),
                FacilityCandidate::unresolved(),
            ])
        }
    }

    fn context(search: Arc<LoggingSearch>) -> CliContext {
        bootstrap_with(
            &Settings::with_defaults(),
            Arc::new(SilentAdvisor),
            search,
            Arc::new(SeededJitter::new(1, 0.015)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_places_for_other_pet_and_category() {
        let search = Arc::new(LoggingSearch::default());
        let ctx = context(search.clone());

        let snapshot = search_places(&ctx, "pet-2", "hotel", Coordinate::new(35.1, 129.0)).await;

        assert_eq!(snapshot.category, Category::Hotel);
        assert_eq!(snapshot.facilities.len(), 1);
        assert_eq!(snapshot.facilities[0].title, "cat-only hotel one");
        let calls = search.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, Coordinate::new(35.1, 129.0));
        assert!(!ctx.app().map().unmount().await);
    }

    async fn search_places(
        ctx: &CliContext,
        pet: &str,
        category: &str,
        position: Coordinate,
    ) -> MapSnapshot {
        search(
            ctx,
            PlacesArgs {
                pet: Some(pet.to_string()),
                category: Some(category.to_string()),
                position: Some(position),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_default_category_searches_once() {
        let search = Arc::new(LoggingSearch::default());
        let ctx = context(search.clone());

        let snapshot = super::search(&ctx, PlacesArgs::default()).await.unwrap();
        assert_eq!(snapshot.query, "dog-only hospital");
        assert!(!snapshot.located);
        assert_eq!(search.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_category_not_offered_for_species() {
        let search = Arc::new(LoggingSearch::default());
        let ctx = context(search.clone());

        let err = super::search(
            &ctx,
            PlacesArgs {
                category: Some("hotel".to_string()),
                ..PlacesArgs::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(search.calls.lock().unwrap().is_empty());
    }
}

//! Pet registry - the ordered pet list plus the active selection.
//!
//! The registry is owned by the application core and mutated only through
//! [`PetCommand`]s. It is never empty, so [`PetRegistry::active`] always
//! resolves.

use serde::Serialize;

use crate::domain::{Pet, PetDraft, PetId};
use crate::events::AppEvent;
use crate::ports::RegistryError;

/// A mutation of the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum PetCommand {
    /// Create a pet from a draft and select it.
    Add(PetDraft),
    /// Replace the pet with the same id wholesale.
    Replace(Pet),
    /// Make an existing pet active.
    Select(PetId),
}

/// Serializable view of the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub pets: Vec<Pet>,
    pub active_id: PetId,
}

/// Ordered pet profiles and the selected id.
#[derive(Debug, Clone)]
pub struct PetRegistry {
    pets: Vec<Pet>,
    active: PetId,
}

impl PetRegistry {
    /// Build a registry selecting the first pet.
    ///
    /// Fails on an empty list or duplicate ids.
    pub fn new(pets: Vec<Pet>) -> Result<Self, RegistryError> {
        let active = pets.first().ok_or(RegistryError::Empty)?.id.clone();
        for (i, pet) in pets.iter().enumerate() {
            if pets[..i].iter().any(|p| p.id == pet.id) {
                return Err(RegistryError::Duplicate(pet.id.clone()));
            }
        }
        Ok(Self { pets, active })
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn get(&self, id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| &p.id == id)
    }

    /// The selected pet, or the first pet if the selection is stale.
    pub fn active(&self) -> &Pet {
        self.get(&self.active).unwrap_or(&self.pets[0])
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            pets: self.pets.clone(),
            active_id: self.active().id.clone(),
        }
    }

    /// Apply a command, returning the events it produced.
    ///
    /// A failed command leaves the registry untouched.
    pub fn apply(&mut self, command: PetCommand) -> Result<Vec<AppEvent>, RegistryError> {
        match command {
            PetCommand::Add(draft) => {
                let pet = draft.into_pet(PetId::generate())?;
                tracing::info!(
                    target: "petpal.registry",
                    pet_id = %pet.id,
                    name = %pet.name,
                    "Pet added"
                );
                let events = vec![
                    AppEvent::PetAdded {
                        pet_id: pet.id.clone(),
                        name: pet.name.clone(),
                    },
                    AppEvent::ActivePetChanged {
                        pet_id: pet.id.clone(),
                        species: pet.species,
                    },
                ];
                self.active = pet.id.clone();
                self.pets.push(pet);
                Ok(events)
            }
            PetCommand::Replace(pet) => {
                let slot = self
                    .pets
                    .iter_mut()
                    .find(|p| p.id == pet.id)
                    .ok_or_else(|| RegistryError::NotFound(pet.id.clone()))?;
                pet.to_draft().validate()?;
                tracing::info!(
                    target: "petpal.registry",
                    pet_id = %pet.id,
                    "Pet replaced"
                );
                let event = AppEvent::PetUpdated {
                    pet_id: pet.id.clone(),
                    name: pet.name.clone(),
                };
                *slot = pet;
                Ok(vec![event])
            }
            PetCommand::Select(id) => {
                let pet = self
                    .get(&id)
                    .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
                let event = AppEvent::ActivePetChanged {
                    pet_id: pet.id.clone(),
                    species: pet.species,
                };
                tracing::debug!(target: "petpal.registry", pet_id = %id, "Active pet selected");
                self.active = id;
                Ok(vec![event])
            }
        }
    }
}

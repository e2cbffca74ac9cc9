//! Pet profile model
//!
//! Every pet belongs to exactly one user. Ownership is recorded on creation
//! and never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::store::{MemStore, StoreError};

/// Dietary flags captured on the pet profile form
///
/// Missing flags deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietaryPreferences {
    pub grain_free: bool,
    pub hypoallergenic: bool,
    pub sensitive_digestion: bool,
}

/// A customer's pet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    pub name: String,
    pub breed: String,

    /// Age in years
    pub age: i32,

    /// Weight in kilograms
    pub weight: f64,

    pub gender: String,
    pub dietary_preferences: DietaryPreferences,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a pet
#[derive(Debug, Clone)]
pub struct CreatePet {
    pub user_id: i64,
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub weight: f64,
    pub gender: String,
    pub dietary_preferences: DietaryPreferences,
}

impl Pet {
    pub fn create(store: &MemStore, data: CreatePet) -> Result<Self, StoreError> {
        let mut tables = store.write()?;

        let pet = Pet {
            id: tables.pet_ids.next(),
            user_id: data.user_id,
            name: data.name,
            breed: data.breed,
            age: data.age,
            weight: data.weight,
            gender: data.gender,
            dietary_preferences: data.dietary_preferences,
            created_at: Utc::now(),
        };
        tables.pets.insert(pet.id, pet.clone());

        Ok(pet)
    }

    pub fn find_by_id(store: &MemStore, id: i64) -> Result<Option<Self>, StoreError> {
        Ok(store.read()?.pets.get(&id).cloned())
    }

    /// Pets owned by a user, ordered by id
    pub fn list_by_user(store: &MemStore, user_id: i64) -> Result<Vec<Self>, StoreError> {
        Ok(store
            .read()?
            .pets
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

//! Pet profile endpoints
//!
//! - `POST /api/pets` - Create a pet for the session user
//! - `GET  /api/pets` - The session user's pets
//! - `GET  /api/pets/:id` - One pet, owner only

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, ValidatedJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use moracat_shared::{
    auth::{authorization::require_ownership, context::AuthContext},
    models::pet::{CreatePet, DietaryPreferences, Pet},
};
use serde::Deserialize;
use validator::Validate;

/// Create pet request
///
/// Any `userId` in the body is ignored; the owner is the session user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[validate(length(min = 1, message = "Pet name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: String,

    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: i32,

    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: f64,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[serde(default)]
    pub dietary_preferences: DietaryPreferences,
}

pub async fn create_pet(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<CreatePetRequest>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    let pet = Pet::create(
        &state.store,
        CreatePet {
            user_id: auth.user_id,
            name: req.name,
            breed: req.breed,
            age: req.age,
            weight: req.weight,
            gender: req.gender,
            dietary_preferences: req.dietary_preferences,
        },
    )?;

    tracing::info!(pet_id = pet.id, user_id = auth.user_id, "Pet created");

    Ok((StatusCode::CREATED, Json(pet)))
}

/// Lists the session user's pets; `[]` when there are none
pub async fn list_pets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Pet>>> {
    Ok(Json(Pet::list_by_user(&state.store, auth.user_id)?))
}

/// # Errors
///
/// - `400 Bad Request`: non-numeric id
/// - `403 Forbidden`: pet belongs to someone else
/// - `404 Not Found`: no such pet
pub async fn get_pet(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pet>> {
    let id = parse_id(&id, "pet")?;

    let pet = Pet::find_by_id(&state.store, id)?
        .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))?;

    require_ownership(&auth, pet.user_id)?;

    Ok(Json(pet))
}

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    auth::AuthOwner,
    database::{owner_ops, pet_ops},
    error::{AppError, Result},
    AppState, CreatePetRequest, LoginRequest, OwnerInfo, PetInfo, SignupRequest, TokenResponse,
};
use uwlink_auth::Password;
use uwlink_entity::{owner, pet};

fn owner_info(owner: &owner::Model, pets: Vec<Uuid>) -> OwnerInfo {
    OwnerInfo {
        owner_id: owner.owner_id,
        pets,
        joined_at: owner.joined_at,
    }
}

fn pet_info(pet: &pet::Model) -> PetInfo {
    PetInfo {
        pet_id: pet.pet_id,
        name: pet.name.clone(),
        kind: pet.kind.clone(),
        owner_id: pet.owner_id,
    }
}

// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "uwlink-backend",
        "timestamp": chrono::Utc::now()
    }))
}

// Signup creates a new owner. Only a salted hash of the password is stored;
// login re-derives the hash from the attempt and compares.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<OwnerInfo>> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password must not be empty".to_string(),
        ));
    }

    // The unique index on username is the backstop for concurrent signups;
    // this check makes the common case a clean 409
    if owner_ops::get_owner_by_username(&state.db, &request.username)
        .await?
        .is_some()
    {
        return Err(AppError::UsernameTaken);
    }

    let hashed_password = Password::hash(&request.password)?;
    let owner = owner_ops::create_owner(&state.db, request.username, hashed_password).await?;

    tracing::info!("👤 New owner signed up: {}", owner.owner_id);

    Ok(Json(owner_info(&owner, Vec::new())))
}

// If the credentials are valid, issue a bearer token. Authenticated endpoints
// expect it as an HTTP header:
//
// Authorization: Bearer <token>
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    // Unknown user and wrong password get the same response
    let owner = owner_ops::get_owner_by_username(&state.db, &request.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !Password::verify(&request.password, &owner.hashed_password)? {
        return Err(AppError::InvalidCredentials);
    }

    let access_token = state
        .token_keys
        .issue(owner.owner_id, state.config.token_ttl())?;

    tracing::debug!("🔑 Issued access token for owner {}", owner.owner_id);

    Ok(Json(TokenResponse { access_token }))
}

// Listing every document in a collection is usually a bad idea at scale, but
// this mirrors the original API surface for exploring the data
pub async fn get_all_owners(
    State(state): State<AppState>,
    _auth: AuthOwner,
) -> Result<Json<Vec<OwnerInfo>>> {
    let owners = owner_ops::list_owners(&state.db).await?;
    let pets = pet_ops::list_pets(&state.db).await?;

    let mut pets_by_owner: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for pet in &pets {
        pets_by_owner
            .entry(pet.owner_id)
            .or_default()
            .push(pet.pet_id);
    }

    let infos = owners
        .iter()
        .map(|owner| {
            let pet_ids = pets_by_owner.remove(&owner.owner_id).unwrap_or_default();
            owner_info(owner, pet_ids)
        })
        .collect();

    Ok(Json(infos))
}

pub async fn get_owner(
    State(state): State<AppState>,
    _auth: AuthOwner,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<OwnerInfo>> {
    let owner = owner_ops::get_owner_by_public_id(&state.db, owner_id)
        .await?
        .ok_or(AppError::OwnerNotFound)?;

    let pet_ids = pet_ops::list_pet_ids_for_owner(&state.db, owner.owner_id).await?;

    Ok(Json(owner_info(&owner, pet_ids)))
}

pub async fn get_all_pets(
    State(state): State<AppState>,
    _auth: AuthOwner,
) -> Result<Json<Vec<PetInfo>>> {
    let pets = pet_ops::list_pets(&state.db).await?;

    Ok(Json(pets.iter().map(pet_info).collect()))
}

pub async fn get_pet(
    State(state): State<AppState>,
    _auth: AuthOwner,
    Path(pet_id): Path<Uuid>,
) -> Result<Json<PetInfo>> {
    let pet = pet_ops::get_pet_by_public_id(&state.db, pet_id)
        .await?
        .ok_or(AppError::PetNotFound)?;

    Ok(Json(pet_info(&pet)))
}

// Create a pet owned by the authenticated owner. The owner comes from the
// token subject, never from the request body.
pub async fn create_pet(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(request): Json<CreatePetRequest>,
) -> Result<Json<PetInfo>> {
    // A valid token can outlive its owner record, so look the owner up
    let owner = owner_ops::get_owner_by_public_id(&state.db, auth.owner_id)
        .await?
        .ok_or(AppError::OwnerNotFound)?;

    let pet = pet_ops::create_pet(&state.db, request.name, request.kind, owner.owner_id).await?;

    tracing::info!("🐾 Owner {} registered pet {}", owner.owner_id, pet.pet_id);

    Ok(Json(pet_info(&pet)))
}

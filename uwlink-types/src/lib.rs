use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request types
#[derive(Serialize, Deserialize, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CreatePetRequest {
    pub name: String,
    /// Pet kind, e.g. "dog" or "cat"
    #[serde(rename = "type")]
    pub kind: String,
}

// Response types
#[derive(Serialize, Deserialize, Clone)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Owner as returned by the API. The username and password hash are
/// deliberately not part of the response schema.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct OwnerInfo {
    pub owner_id: Uuid,
    pub pets: Vec<Uuid>,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct PetInfo {
    pub pet_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub owner_id: Uuid,
}

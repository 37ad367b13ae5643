use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to run an AI search for one child
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSearchRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "child_profile_id", rename = "childProfileId")]
    pub child_profile_id: Uuid,
}

/// Request to create a child profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub hashkafa: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Request to generate a narrative profile from a library entry plus
/// research notes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateProfileRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "library_id", rename = "libraryId")]
    pub library_id: Uuid,
    #[validate(length(min = 1))]
    pub notes: Vec<String>,
}

/// Owner-scoped query string (`?userId=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
}

/// Library listing query string (`?userId=...&uploadedFor=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "uploaded_for", rename = "uploadedFor", default)]
    pub uploaded_for: Option<String>,
}

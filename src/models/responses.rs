use serde::{Deserialize, Serialize};
use crate::models::domain::{AiProfile, LibraryEntry, MatchRecord};

/// Response for a completed (or short-circuited) AI search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<MatchRecord>,
    #[serde(rename = "totalProcessed")]
    pub total_processed: usize,
    #[serde(rename = "originalCount")]
    pub original_count: usize,
    #[serde(rename = "filteredByGender")]
    pub filtered_by_gender: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for a resume upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub entry: LibraryEntry,
    /// Whether structured extraction produced any data for this upload
    pub parsed: bool,
}

/// Response for a generated narrative profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateProfileResponse {
    pub profile: AiProfile,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for delete operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

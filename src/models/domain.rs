use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binary gender used for pool filtering
///
/// Profile gender fields are free text; anything that doesn't read as
/// male/female stays untyped and the filter falls back to a permissive
/// pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a free-text gender value, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// A child's profile, entered directly by the owning account
///
/// This is the authoritative side of a pairing. Free-text fields may be
/// absent; scoring proceeds with whatever is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
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
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ChildProfile {
    /// The child's declared gender, if it reads as male/female
    pub fn declared_gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

/// Best-effort profile extracted from an uploaded resume
///
/// Every field is optional: the extraction reply is untyped at the boundary
/// and converted into this shape, degrading to all-null rather than failing.
/// Field names match the JSON keys the extraction prompt asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedProfile {
    #[serde(default)]
    pub name: Option<String>,
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
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub family_values: Option<String>,
}

impl ParsedProfile {
    /// The candidate's gender as extracted, if it reads as male/female
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

/// Known purpose tags for uploaded resumes
///
/// Each feature context draws its candidate pool only from entries carrying
/// its own tag. The column itself is free text; these are the tags the
/// service acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPurpose {
    #[serde(rename = "AI Search")]
    AiSearch,
    #[serde(rename = "AI Profile")]
    AiProfile,
}

impl UploadPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadPurpose::AiSearch => "AI Search",
            UploadPurpose::AiProfile => "AI Profile",
        }
    }
}

/// An uploaded resume with provenance and its best-effort parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: String,
    #[serde(rename = "uploadedFor")]
    pub uploaded_for: String,
    #[serde(rename = "parsedData", default)]
    pub parsed_data: Option<ParsedProfile>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl LibraryEntry {
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.parsed_data.as_ref().and_then(ParsedProfile::parsed_gender)
    }
}

/// Structured compatibility highlights for one pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHighlights {
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub summary: String,
}

/// One scored (child, candidate) pairing, aggregated in memory before the
/// batch is flushed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPair {
    #[serde(rename = "childProfileId")]
    pub child_profile_id: Uuid,
    #[serde(rename = "libraryId")]
    pub library_id: Uuid,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    pub highlights: MatchHighlights,
}

/// Compact child summary joined onto a persisted match row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildSummary {
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Compact library summary joined onto a persisted match row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySummary {
    #[serde(rename = "parsedData", default)]
    pub parsed_data: Option<ParsedProfile>,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: String,
}

/// A persisted match result
///
/// References are plain ids without referential integrity: deleting the
/// child profile or the library entry leaves the row in place, and the
/// joined summaries come back as None.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    #[serde(rename = "parentId")]
    pub parent_id: Uuid,
    #[serde(rename = "childProfileId")]
    pub child_profile_id: Uuid,
    #[serde(rename = "libraryId")]
    pub library_id: Uuid,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    pub highlights: MatchHighlights,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "childProfile", skip_serializing_if = "Option::is_none")]
    pub child_profile: Option<ChildSummary>,
    #[serde(rename = "matchedEntry", skip_serializing_if = "Option::is_none")]
    pub matched_entry: Option<LibrarySummary>,
}

/// A generated narrative profile for a library entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiProfile {
    pub id: Uuid,
    #[serde(rename = "parentId")]
    pub parent_id: Uuid,
    #[serde(rename = "libraryId")]
    pub library_id: Uuid,
    pub summary: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

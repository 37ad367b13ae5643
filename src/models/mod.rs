// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AiProfile, ChildProfile, ChildSummary, Gender, LibraryEntry, LibrarySummary, MatchHighlights,
    MatchRecord, ParsedProfile, ScoredPair, UploadPurpose,
};
pub use requests::{
    CreateProfileRequest, GenerateProfileRequest, LibraryQuery, OwnerQuery, RunSearchRequest,
};
pub use responses::{
    DeleteResponse, ErrorResponse, GenerateProfileResponse, HealthResponse, SearchResponse,
    UploadResponse,
};

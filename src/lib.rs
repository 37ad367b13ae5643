//! Shidduch Algo - AI match-scoring service for the Shidduch matchmaking platform
//!
//! This library implements the resume-to-match pipeline: uploaded resumes are
//! sent to an external extraction service, parsed into structured profiles by
//! a completion-service call, filtered by gender compatibility against a
//! child's profile, scored pairwise, and persisted as match records in one
//! batch per search.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matchmaker, ProfileParser, ProfileWriter, SearchOutcome};
pub use models::{
    ChildProfile, Gender, LibraryEntry, MatchHighlights, MatchRecord, ParsedProfile, ScoredPair,
    UploadPurpose,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(UploadPurpose::AiSearch.as_str(), "AI Search");
    }
}

// Core pipeline exports
pub mod filters;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod scorer;
pub mod writer;

pub use filters::{entries_for_purpose, filter_by_gender};
pub use parser::{parse_profile_reply, strip_code_fences, ProfileParser};
pub use pipeline::{Matchmaker, SearchOutcome};
pub use scorer::{fallback_pair, parse_score_reply, MatchAnalysis, ScoreError, NEUTRAL_SCORE};
pub use writer::ProfileWriter;

use crate::core::parser::strip_code_fences;
use crate::models::{MatchHighlights, ScoredPair};
use crate::services::completion::CompletionError;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Score recorded when a pairing could not be analyzed
pub const NEUTRAL_SCORE: i32 = 50;

/// Errors for a single pairwise comparison
///
/// Transport/API failures and malformed replies are distinct variants, but
/// both degrade the same way: the pair gets a neutral default and the batch
/// moves on.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("completion call failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("malformed analysis reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A parsed compatibility analysis for one pairing
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAnalysis {
    pub match_score: i32,
    pub highlights: MatchHighlights,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    match_score: f64,
    highlights: MatchHighlights,
}

/// Parse a scoring reply into a match analysis
///
/// Strips code fences first; the score is rounded to an integer. The
/// nominal 1-100 range is not enforced here.
pub fn parse_score_reply(raw: &str) -> Result<MatchAnalysis, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    let parsed: RawAnalysis = serde_json::from_str(&cleaned)?;

    Ok(MatchAnalysis {
        match_score: parsed.match_score.round() as i32,
        highlights: parsed.highlights,
    })
}

/// The degraded result recorded when one pairing fails
pub fn fallback_pair(child_profile_id: Uuid, library_id: Uuid) -> ScoredPair {
    ScoredPair {
        child_profile_id,
        library_id,
        match_score: NEUTRAL_SCORE,
        highlights: MatchHighlights {
            strengths: vec!["Analysis unavailable".to_string()],
            concerns: vec!["Could not analyze compatibility".to_string()],
            summary: "Match analysis failed, manual review recommended.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_reply_happy_path() {
        let reply = r#"{
            "match_score": 82,
            "highlights": {
                "strengths": ["Shared hashkafa", "Both in the tri-state area"],
                "concerns": ["Age gap"],
                "summary": "A promising pairing worth pursuing."
            }
        }"#;

        let analysis = parse_score_reply(reply).unwrap();
        assert_eq!(analysis.match_score, 82);
        assert_eq!(analysis.highlights.strengths.len(), 2);
        assert_eq!(analysis.highlights.concerns, vec!["Age gap"]);
    }

    #[test]
    fn test_parse_score_reply_with_fences() {
        let reply = "```json\n{\"match_score\": 71.4, \"highlights\": {\"strengths\": [\"s\"], \"concerns\": [\"c\"], \"summary\": \"ok\"}}\n```";
        let analysis = parse_score_reply(reply).unwrap();
        assert_eq!(analysis.match_score, 71);
    }

    #[test]
    fn test_parse_score_reply_malformed() {
        assert!(parse_score_reply("not json at all").is_err());
        assert!(parse_score_reply(r#"{"match_score": "high"}"#).is_err());
    }

    #[test]
    fn test_fallback_pair_constants() {
        let pair = fallback_pair(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(pair.match_score, 50);
        assert_eq!(pair.highlights.strengths, vec!["Analysis unavailable"]);
        assert_eq!(pair.highlights.concerns, vec!["Could not analyze compatibility"]);
        assert_eq!(
            pair.highlights.summary,
            "Match analysis failed, manual review recommended."
        );
    }
}

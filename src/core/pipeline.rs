use crate::core::filters::{entries_for_purpose, filter_by_gender};
use crate::core::prompts::{
    build_match_prompt, MATCH_MAX_TOKENS, MATCH_SYSTEM_PROMPT, MATCH_TEMPERATURE,
};
use crate::core::scorer::{fallback_pair, parse_score_reply, ScoreError};
use crate::models::{ChildProfile, Gender, LibraryEntry, ScoredPair, UploadPurpose};
use crate::services::completion::{ChatMessage, ChatRequest, CompletionClient};
use std::sync::Arc;

/// Outcome of one search invocation, before any persistence or presentation
///
/// The pipeline returns data only; translating an outcome into user-facing
/// messages is the route layer's job.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Nothing has been uploaded for this feature context
    EmptyPool,
    /// The gender filter removed every candidate; no scoring calls were made
    NoCompatibleCandidates {
        target: Option<Gender>,
        pool_size: usize,
    },
    /// Every eligible pairing was scored (some possibly degraded)
    Completed {
        pairs: Vec<ScoredPair>,
        pool_size: usize,
        filtered_out: usize,
    },
}

/// Search orchestrator - runs the scoring pipeline for one child
///
/// # Pipeline Stages
/// 1. Purpose-tag pool selection
/// 2. Opposite-gender filtering
/// 3. Sequential pairwise scoring with per-pair failure isolation
#[derive(Clone)]
pub struct Matchmaker {
    completion: Arc<CompletionClient>,
    model: String,
}

impl Matchmaker {
    pub fn new(completion: Arc<CompletionClient>, model: String) -> Self {
        Self { completion, model }
    }

    /// Score a child against the library entries visible to a search
    ///
    /// Pairings are scored one at a time; a single failed completion call
    /// or malformed reply is replaced with a neutral default result and the
    /// loop continues, so one bad pairing never aborts the batch. The loop
    /// is intentionally sequential: it bounds load on the completion
    /// service, and a search's latency scales linearly with pool size.
    pub async fn score_batch(
        &self,
        child: &ChildProfile,
        entries: &[LibraryEntry],
        context: UploadPurpose,
    ) -> SearchOutcome {
        // Stage 1: only entries uploaded for this feature context
        let pool = entries_for_purpose(entries, context.as_str());
        let pool_size = pool.len();

        if pool.is_empty() {
            return SearchOutcome::EmptyPool;
        }

        // Stage 2: opposite-gender filter (permissive when child gender unknown)
        let child_gender = child.declared_gender();
        let (eligible, filtered_out) = filter_by_gender(child_gender, pool);

        match child_gender {
            Some(gender) => tracing::info!(
                "Filtered {} resumes to {} based on gender compatibility (child: {}, looking for: {})",
                pool_size,
                eligible.len(),
                gender.as_str(),
                gender.opposite().as_str()
            ),
            None => tracing::info!("No gender filtering applied - child gender not specified"),
        }

        if eligible.is_empty() {
            return SearchOutcome::NoCompatibleCandidates {
                target: child_gender.map(Gender::opposite),
                pool_size,
            };
        }

        // Stage 3: sequential pairwise scoring
        let mut pairs = Vec::with_capacity(eligible.len());
        for entry in eligible {
            let pair = match self.score_pair(child, entry).await {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!(
                        "Failed to score library entry {} against child {}: {}",
                        entry.id,
                        child.id,
                        e
                    );
                    fallback_pair(child.id, entry.id)
                }
            };
            pairs.push(pair);
        }

        tracing::info!("Generated {} matches for child {}", pairs.len(), child.name);

        SearchOutcome::Completed {
            pairs,
            pool_size,
            filtered_out,
        }
    }

    /// Score one (child, candidate) pairing via the completion service
    async fn score_pair(
        &self,
        child: &ChildProfile,
        entry: &LibraryEntry,
    ) -> Result<ScoredPair, ScoreError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(MATCH_SYSTEM_PROMPT),
                ChatMessage::user(build_match_prompt(child, entry.parsed_data.as_ref())),
            ],
            temperature: MATCH_TEMPERATURE,
            max_tokens: MATCH_MAX_TOKENS,
        };

        let reply = self.completion.chat(&request).await?;
        let analysis = parse_score_reply(&reply)?;

        Ok(ScoredPair {
            child_profile_id: child.id,
            library_id: entry.id,
            match_score: analysis.match_score,
            highlights: analysis.highlights,
        })
    }
}

use crate::core::prompts::{
    build_extraction_prompt, EXTRACTION_MAX_TOKENS, EXTRACTION_SYSTEM_PROMPT,
    EXTRACTION_TEMPERATURE,
};
use crate::models::ParsedProfile;
use crate::services::completion::{ChatMessage, ChatRequest, CompletionClient};
use regex::Regex;
use std::sync::Arc;

/// Strip enclosing markdown code-fence markers from a completion reply
///
/// The completion service is instructed to return bare JSON but routinely
/// wraps it in ```json fences anyway; parsing happens on the stripped text.
pub fn strip_code_fences(raw: &str) -> String {
    let mut body = raw.trim();

    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }

    body = body.trim_start_matches('\n');

    let trimmed = body.trim_end();
    let without_close = trimmed.strip_suffix("```").unwrap_or(trimmed);

    without_close.trim().to_string()
}

/// Last-ditch name recovery from a reply that failed structural parsing
///
/// Looks for a literal `"name": "..."` fragment in the raw text so the
/// resulting record is not entirely blank.
fn salvage_name(raw: &str) -> Option<String> {
    let pattern = Regex::new(r#""name"\s*:\s*"([^"]+)""#).expect("name pattern is valid");
    pattern.captures(raw).map(|caps| caps[1].to_string())
}

/// Convert an extraction reply into a profile record, absorbing failure
///
/// Never returns an error: a malformed reply degrades to an all-null
/// profile, keeping whatever name can be salvaged from the raw text.
pub fn parse_profile_reply(raw: &str) -> ParsedProfile {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<ParsedProfile>(&cleaned) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Failed to parse extraction reply, degrading to empty profile: {}", e);
            ParsedProfile {
                name: salvage_name(raw),
                ..Default::default()
            }
        }
    }
}

/// Adapter that turns raw extracted document text into a structured profile
///
/// Wraps the completion client with the fixed extraction prompt. Failure is
/// absorbed here: the caller always receives some record, so one bad parse
/// never blocks an upload.
#[derive(Clone)]
pub struct ProfileParser {
    completion: Arc<CompletionClient>,
    model: String,
}

impl ProfileParser {
    pub fn new(completion: Arc<CompletionClient>, model: String) -> Self {
        Self { completion, model }
    }

    /// Extract a structured profile from raw resume text, best-effort
    pub async fn parse(&self, file_content: &str) -> ParsedProfile {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
                ChatMessage::user(build_extraction_prompt(file_content)),
            ],
            temperature: EXTRACTION_TEMPERATURE,
            max_tokens: EXTRACTION_MAX_TOKENS,
        };

        let reply = match self.completion.chat(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Extraction call failed, degrading to empty profile: {}", e);
                return ParsedProfile::default();
            }
        };

        parse_profile_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let wrapped = "```json\n{\"name\": \"Dovid\"}\n```";
        assert_eq!(strip_code_fences(wrapped), "{\"name\": \"Dovid\"}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let wrapped = "```\n{\"age\": 25}\n```";
        assert_eq!(strip_code_fences(wrapped), "{\"age\": 25}");
    }

    #[test]
    fn test_strip_leaves_plain_json_alone() {
        let plain = "{\"name\": \"Dovid\"}";
        assert_eq!(strip_code_fences(plain), plain);
    }

    #[test]
    fn test_parse_reply_happy_path() {
        let reply = r#"{"name": "Chaim Gold", "age": 26, "gender": "Male", "interests": ["learning"]}"#;
        let profile = parse_profile_reply(reply);
        assert_eq!(profile.name.as_deref(), Some("Chaim Gold"));
        assert_eq!(profile.age, Some(26));
        assert_eq!(profile.interests, vec!["learning"]);
    }

    #[test]
    fn test_parse_reply_malformed_degrades_to_empty() {
        let profile = parse_profile_reply("I'm sorry, I can't produce JSON for that.");
        assert!(profile.name.is_none());
        assert!(profile.age.is_none());
        assert!(profile.gender.is_none());
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_parse_reply_salvages_name_from_broken_json() {
        let reply = r#"Here is the data: {"name": "Sarah Cohen", "age": twenty-seven}"#;
        let profile = parse_profile_reply(reply);
        assert_eq!(profile.name.as_deref(), Some("Sarah Cohen"));
        assert!(profile.age.is_none());
    }
}

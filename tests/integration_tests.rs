// Integration tests for the scoring pipeline against a mocked completion
// service

use chrono::Utc;
use mockito::Matcher;
use shidduch_algo::core::{Matchmaker, SearchOutcome};
use shidduch_algo::models::{ChildProfile, Gender, LibraryEntry, ParsedProfile, UploadPurpose};
use shidduch_algo::services::completion::CompletionClient;
use std::sync::Arc;
use uuid::Uuid;

fn create_child(gender: Option<&str>) -> ChildProfile {
    ChildProfile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Rivka Stein".to_string(),
        age: Some(27),
        location: Some("Lakewood".to_string()),
        occupation: Some("Teacher".to_string()),
        education: Some("Seminary".to_string()),
        background: None,
        hashkafa: Some("Yeshivish".to_string()),
        gender: gender.map(str::to_string),
        created_at: Some(Utc::now()),
    }
}

fn create_entry(name: &str, gender: &str, uploaded_for: &str) -> LibraryEntry {
    LibraryEntry {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        uploaded_by: "shadchan@example.com".to_string(),
        uploaded_for: uploaded_for.to_string(),
        parsed_data: Some(ParsedProfile {
            name: Some(name.to_string()),
            gender: Some(gender.to_string()),
            age: Some(28),
            ..Default::default()
        }),
        tags: vec![],
        created_at: Utc::now(),
    }
}

fn matchmaker_for(server: &mockito::ServerGuard) -> Matchmaker {
    let completion = Arc::new(CompletionClient::new(
        server.url(),
        "test_key".to_string(),
    ));
    Matchmaker::new(completion, "gpt-4o-mini".to_string())
}

/// Wrap analysis JSON the way the completion API returns it
fn completion_reply(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn analysis_content(score: i32) -> String {
    format!(
        "```json\n{{\"match_score\": {score}, \"highlights\": {{\"strengths\": [\"Shared values\"], \"concerns\": [\"Distance\"], \"summary\": \"A promising pairing.\"}}}}\n```"
    )
}

#[tokio::test]
async fn test_batch_scores_every_eligible_pair() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_reply(&analysis_content(88)))
        .expect(2)
        .create_async()
        .await;

    let child = create_child(Some("female"));
    let entries = vec![
        create_entry("Candidate One", "male", "AI Search"),
        create_entry("Candidate Two", "male", "AI Search"),
    ];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    match outcome {
        SearchOutcome::Completed {
            pairs,
            pool_size,
            filtered_out,
        } => {
            assert_eq!(pairs.len(), 2);
            assert_eq!(pool_size, 2);
            assert_eq!(filtered_out, 0);
            for pair in &pairs {
                assert_eq!(pair.match_score, 88);
                assert_eq!(pair.highlights.strengths, vec!["Shared values"]);
                assert_eq!(pair.child_profile_id, child.id);
            }
            assert_eq!(pairs[0].library_id, entries[0].id);
            assert_eq!(pairs[1].library_id, entries[1].id);
        }
        other => panic!("Expected Completed outcome, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_single_failure_degrades_one_pair_not_the_batch() {
    let mut server = mockito::Server::new_async().await;

    // Specific failure mock for the third candidate, registered first so
    // mockito's first-missing-hits resolution picks it over the generic
    // success mock when the body matcher hits; only that call fails.
    let failure = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Candidate Three".to_string()))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    // Generic success mock for the remaining four candidates
    let success = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_reply(&analysis_content(90)))
        .expect(4)
        .create_async()
        .await;

    let child = create_child(Some("female"));
    let entries = vec![
        create_entry("Candidate One", "male", "AI Search"),
        create_entry("Candidate Two", "male", "AI Search"),
        create_entry("Candidate Three", "male", "AI Search"),
        create_entry("Candidate Four", "male", "AI Search"),
        create_entry("Candidate Five", "male", "AI Search"),
    ];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    let pairs = match outcome {
        SearchOutcome::Completed { pairs, .. } => pairs,
        other => panic!("Expected Completed outcome, got {:?}", other),
    };

    // All five pairings recorded, in pool order
    assert_eq!(pairs.len(), 5);

    for (i, pair) in pairs.iter().enumerate() {
        assert_eq!(pair.library_id, entries[i].id);
        if i == 2 {
            assert_eq!(pair.match_score, 50);
            assert_eq!(pair.highlights.strengths, vec!["Analysis unavailable"]);
            assert_eq!(pair.highlights.concerns, vec!["Could not analyze compatibility"]);
            assert_eq!(
                pair.highlights.summary,
                "Match analysis failed, manual review recommended."
            );
        } else {
            assert_eq!(pair.match_score, 90);
        }
    }

    success.assert_async().await;
    failure.assert_async().await;
}

#[tokio::test]
async fn test_malformed_reply_degrades_that_pair() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_reply("I'm sorry, I can't provide a score for that."))
        .expect(1)
        .create_async()
        .await;

    let child = create_child(Some("male"));
    let entries = vec![create_entry("Candidate One", "female", "AI Search")];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    match outcome {
        SearchOutcome::Completed { pairs, .. } => {
            assert_eq!(pairs.len(), 1);
            assert_eq!(pairs[0].match_score, 50);
        }
        other => panic!("Expected Completed outcome, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_filtered_pool_issues_no_scoring_calls() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    // Female child with only female candidates: everything filters out
    let child = create_child(Some("female"));
    let entries = vec![
        create_entry("Candidate One", "female", "AI Search"),
        create_entry("Candidate Two", "female", "AI Search"),
    ];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    match outcome {
        SearchOutcome::NoCompatibleCandidates { target, pool_size } => {
            assert_eq!(target, Some(Gender::Male));
            assert_eq!(pool_size, 2);
        }
        other => panic!("Expected NoCompatibleCandidates outcome, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_entries_for_other_contexts_are_invisible() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    // Only AI Profile uploads exist, so an AI Search finds an empty pool
    let child = create_child(Some("female"));
    let entries = vec![
        create_entry("Candidate One", "male", "AI Profile"),
        create_entry("Candidate Two", "male", "AI Profile"),
    ];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    assert!(matches!(outcome, SearchOutcome::EmptyPool));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_child_gender_scores_full_pool() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_reply(&analysis_content(65)))
        .expect(3)
        .create_async()
        .await;

    let child = create_child(None);
    let entries = vec![
        create_entry("Candidate One", "male", "AI Search"),
        create_entry("Candidate Two", "female", "AI Search"),
        create_entry("Candidate Three", "male", "AI Search"),
    ];

    let matchmaker = matchmaker_for(&server);
    let outcome = matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    match outcome {
        SearchOutcome::Completed {
            pairs,
            pool_size,
            filtered_out,
        } => {
            assert_eq!(pairs.len(), 3);
            assert_eq!(pool_size, 3);
            assert_eq!(filtered_out, 0);
        }
        other => panic!("Expected Completed outcome, got {:?}", other),
    }

    mock.assert_async().await;
}

// Criterion benchmarks for Shidduch Algo

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shidduch_algo::core::{filters::filter_by_gender, parser::strip_code_fences, prompts::build_match_prompt};
use shidduch_algo::models::{ChildProfile, Gender, LibraryEntry, ParsedProfile};
use uuid::Uuid;

fn create_entry(id: usize) -> LibraryEntry {
    LibraryEntry {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        uploaded_by: format!("uploader{}@example.com", id),
        uploaded_for: "AI Search".to_string(),
        parsed_data: Some(ParsedProfile {
            name: Some(format!("Candidate {}", id)),
            age: Some(22 + (id % 10) as i32),
            gender: Some(if id % 2 == 0 { "male" } else { "female" }.to_string()),
            location: Some("Brooklyn, NY".to_string()),
            ..Default::default()
        }),
        tags: vec![],
        created_at: Utc::now(),
    }
}

fn create_child() -> ChildProfile {
    ChildProfile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Rivka Stein".to_string(),
        age: Some(24),
        location: Some("Lakewood, NJ".to_string()),
        occupation: Some("Teacher".to_string()),
        education: Some("Seminary".to_string()),
        background: Some("Warm, close-knit family".to_string()),
        hashkafa: Some("Yeshivish".to_string()),
        gender: Some("female".to_string()),
        created_at: Some(Utc::now()),
    }
}

fn bench_strip_code_fences(c: &mut Criterion) {
    let wrapped = "```json\n{\"match_score\": 82, \"highlights\": {\"strengths\": [\"a\"], \"concerns\": [\"b\"], \"summary\": \"c\"}}\n```";

    c.bench_function("strip_code_fences", |b| {
        b.iter(|| strip_code_fences(black_box(wrapped)));
    });
}

fn bench_gender_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("gender_filter");

    for size in [10usize, 100, 1000] {
        let entries: Vec<LibraryEntry> = (0..size).map(create_entry).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let pool: Vec<&LibraryEntry> = entries.iter().collect();
                filter_by_gender(black_box(Some(Gender::Female)), pool)
            });
        });
    }

    group.finish();
}

fn bench_build_match_prompt(c: &mut Criterion) {
    let child = create_child();
    let entry = create_entry(1);

    c.bench_function("build_match_prompt", |b| {
        b.iter(|| build_match_prompt(black_box(&child), black_box(entry.parsed_data.as_ref())));
    });
}

criterion_group!(
    benches,
    bench_strip_code_fences,
    bench_gender_filter,
    bench_build_match_prompt
);
criterion_main!(benches);

use std::time::Duration;

use super::*;
use crate::catalog::{AssessmentRecord, Support};
use crate::retrieval::Candidate;

const KNOWLEDGE: &str = "Knowledge & Skills";
const PERSONALITY: &str = "Personality & Behavior";

fn record(name: &str, types: &[&str]) -> AssessmentRecord {
    AssessmentRecord {
        url: format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        description: format!("Measures {name}."),
        duration: 30,
        adaptive_support: Support::No,
        remote_support: Support::Yes,
        test_types: types.iter().map(|t| t.to_string()).collect(),
    }
}

fn batch(records: Vec<AssessmentRecord>) -> Vec<Candidate> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| Candidate::new(i, 1.0 - i as f32 * 0.01, r))
        .collect()
}

/// `n` technical candidates named "Tech 0".."Tech n-1".
fn technical_batch(n: usize) -> Vec<Candidate> {
    batch((0..n).map(|i| record(&format!("Tech {i}"), &[KNOWLEDGE])).collect())
}

fn java_and_opq() -> Vec<Candidate> {
    batch(vec![
        record("Core Java", &[KNOWLEDGE]),
        record("OPQ32r", &[PERSONALITY]),
    ])
}

fn reranker(model: ScriptedModel) -> Reranker<ScriptedModel> {
    Reranker::new(model, RerankerConfig::new("test-model")).unwrap()
}

fn names(outcome: &RerankOutcome) -> Vec<&str> {
    outcome.records.iter().map(|r| r.name.as_str()).collect()
}

// --- successful selection ---

#[tokio::test]
async fn test_model_order_is_preserved() {
    let reranker = reranker(ScriptedModel::replying("[1, 0]"));

    let outcome = reranker.rerank("java developer", &java_and_opq()).await;

    assert_eq!(outcome.status, RerankStatus::Reranked);
    assert_eq!(names(&outcome), vec!["OPQ32r", "Core Java"]);
}

#[tokio::test]
async fn test_invalid_ids_are_dropped_silently() {
    let reranker = reranker(ScriptedModel::replying("[7, 2, -1, \"0\", 2, 4]"));

    let outcome = reranker.rerank("q", &technical_batch(5)).await;

    assert_eq!(outcome.status, RerankStatus::Reranked);
    assert_eq!(names(&outcome), vec!["Tech 2", "Tech 4"]);
}

#[tokio::test]
async fn test_selection_is_capped_at_ten() {
    let ids: Vec<String> = (0..15).rev().map(|i| i.to_string()).collect();
    let reranker = reranker(ScriptedModel::replying(format!("[{}]", ids.join(","))));

    let outcome = reranker.rerank("q", &technical_batch(25)).await;

    assert_eq!(outcome.records.len(), 10);
    assert_eq!(outcome.records[0].name, "Tech 14");
}

#[tokio::test]
async fn test_fenced_reply_is_accepted() {
    let reranker = reranker(ScriptedModel::replying("```json\n[1]\n```"));

    let outcome = reranker.rerank("q", &java_and_opq()).await;

    assert_eq!(outcome.status, RerankStatus::Reranked);
    assert_eq!(names(&outcome), vec!["OPQ32r"]);
}

// --- tier 2 ---

#[tokio::test]
async fn test_out_of_range_id_falls_back_to_narrow_prefix() {
    let reranker = reranker(ScriptedModel::replying("[5]"));

    let outcome = reranker.rerank("q", &java_and_opq()).await;

    assert_eq!(outcome.status, RerankStatus::EmptySelection);
    assert_eq!(names(&outcome), vec!["Core Java", "OPQ32r"]);
}

#[tokio::test]
async fn test_all_invalid_ids_return_first_five() {
    let reranker = reranker(ScriptedModel::replying("[100, 200, 300]"));

    let outcome = reranker.rerank("q", &technical_batch(25)).await;

    assert_eq!(outcome.status, RerankStatus::EmptySelection);
    assert_eq!(
        names(&outcome),
        vec!["Tech 0", "Tech 1", "Tech 2", "Tech 3", "Tech 4"]
    );
}

#[tokio::test]
async fn test_empty_array_is_empty_selection() {
    let reranker = reranker(ScriptedModel::replying("[]"));

    let outcome = reranker.rerank("q", &technical_batch(8)).await;

    assert_eq!(outcome.status, RerankStatus::EmptySelection);
    assert_eq!(outcome.records.len(), 5);
}

// --- tier 1 ---

#[tokio::test]
async fn test_model_error_returns_first_ten() {
    let reranker = reranker(ScriptedModel::failing("quota exceeded"));

    let outcome = reranker.rerank("q", &technical_batch(25)).await;

    assert_eq!(outcome.status, RerankStatus::ModelFailure);
    assert!(outcome.status.is_fallback());
    assert_eq!(outcome.records.len(), 10);
    for (i, record) in outcome.records.iter().enumerate() {
        assert_eq!(record.name, format!("Tech {i}"));
    }
}

#[tokio::test]
async fn test_model_error_with_small_batch_returns_all() {
    let reranker = reranker(ScriptedModel::failing("boom"));

    let outcome = reranker.rerank("q", &technical_batch(3)).await;

    assert_eq!(outcome.records.len(), 3);
}

#[tokio::test]
async fn test_timeout_is_tier_one() {
    let config = RerankerConfig::new("test-model").with_timeout(Duration::from_millis(20));
    let reranker = Reranker::new(ScriptedModel::hanging(), config).unwrap();

    let outcome = reranker.rerank("q", &technical_batch(12)).await;

    assert_eq!(outcome.status, RerankStatus::ModelFailure);
    assert_eq!(outcome.records.len(), 10);
}

#[tokio::test]
async fn test_unparsable_reply_is_tier_one() {
    for reply in ["I'd pick 1 and 3", "{\"ids\": [1]}", "42", ""] {
        let reranker = reranker(ScriptedModel::replying(reply));

        let outcome = reranker.rerank("q", &technical_batch(12)).await;

        assert_eq!(outcome.status, RerankStatus::ModelFailure, "reply: {reply:?}");
        assert_eq!(outcome.records.len(), 10);
    }
}

// --- call discipline ---

#[tokio::test]
async fn test_exactly_one_call_even_on_failure() {
    let reranker = reranker(ScriptedModel::failing("boom"));

    reranker.rerank("q", &technical_batch(3)).await;

    assert_eq!(reranker.model().call_count(), 1);
}

#[tokio::test]
async fn test_empty_batch_skips_model() {
    let reranker = reranker(ScriptedModel::replying("[0]"));

    let outcome = reranker.rerank("q", &[]).await;

    assert!(outcome.records.is_empty());
    assert_eq!(reranker.model().call_count(), 0);
}

#[tokio::test]
async fn test_prompt_lists_every_candidate() {
    let reranker = reranker(ScriptedModel::replying("[0]"));

    reranker.rerank("java developer with leadership", &java_and_opq()).await;

    let prompt = reranker.model().last_prompt().unwrap();
    assert!(prompt.user.contains("USER QUERY: \"java developer with leadership\""));
    assert!(prompt.user.contains("ID 0: Core Java | Types: Knowledge & Skills | Desc: Measures Core Java...."));
    assert!(prompt.user.contains("ID 1: OPQ32r | Types: Personality & Behavior"));
    assert!(prompt.user.contains("Balance"));
    assert!(prompt.user.contains("5 to 10"));
}

#[test]
fn test_prompt_sections_in_order() {
    let prompt = build_prompt("  java developer  ", &java_and_opq(), &RerankerConfig::default());

    let positions: Vec<usize> = ["USER QUERY", "TASK:", "RULES:", "CANDIDATES:", "OUTPUT FORMAT:"]
        .iter()
        .map(|section| prompt.user.find(section).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(prompt.user.starts_with("USER QUERY: \"java developer\""));
    assert!(prompt.user.ends_with("Example: [12, 5, 3, 8, 1]"));
    assert_eq!(prompt.user.lines().filter(|l| l.starts_with("ID ")).count(), 2);
}

#[test]
fn test_prompt_preview_is_bounded() {
    let mut long = record("Long", &[KNOWLEDGE]);
    long.description = "d".repeat(450);
    let candidates = batch(vec![long]);

    let prompt = build_prompt("q", &candidates, &RerankerConfig::default());

    let line = prompt.user.lines().find(|l| l.starts_with("ID 0")).unwrap();
    assert!(line.ends_with(&format!("{}...", "d".repeat(200))));
    assert!(!line.contains(&"d".repeat(201)));
}

// --- balance ---

#[test]
fn test_intent_detection() {
    assert!(QueryIntent::detect("Java developer with team leadership skills").is_mixed());
    assert!(QueryIntent::detect("Python developer").technical);
    assert!(!QueryIntent::detect("Python developer").behavioral);
    assert!(QueryIntent::detect("personality of a sales lead").behavioral);
    assert!(!QueryIntent::detect("update the schedule").technical);
}

#[test]
fn test_category_families() {
    assert_eq!(CategoryFamily::of(KNOWLEDGE), CategoryFamily::Technical);
    assert_eq!(CategoryFamily::of("Ability & Aptitude"), CategoryFamily::Technical);
    assert_eq!(CategoryFamily::of(PERSONALITY), CategoryFamily::Behavioral);
    assert_eq!(
        CategoryFamily::of("Biodata & Situational Judgement"),
        CategoryFamily::Behavioral
    );
    assert_eq!(CategoryFamily::of("Unknown"), CategoryFamily::Other);
}

#[tokio::test]
async fn test_mixed_query_selection_spans_both_families() {
    let candidates = batch(vec![
        record("Core Java", &[KNOWLEDGE]),
        record("Spring", &[KNOWLEDGE]),
        record("OPQ32r", &[PERSONALITY]),
        record("Leadership Report", &[PERSONALITY]),
    ]);
    let reranker = reranker(ScriptedModel::replying("[0, 2, 1, 3]"));

    let outcome = reranker
        .rerank("Java developer who can drive team leadership", &candidates)
        .await;

    let families: Vec<_> = outcome
        .records
        .iter()
        .flat_map(|r| r.test_types.iter().map(|t| CategoryFamily::of(t)))
        .collect();
    assert!(families.contains(&CategoryFamily::Technical));
    assert!(families.contains(&CategoryFamily::Behavioral));
}

#[tokio::test]
async fn test_enforced_balance_repairs_one_sided_selection() {
    let candidates = batch(vec![
        record("Core Java", &[KNOWLEDGE]),
        record("Spring", &[KNOWLEDGE]),
        record("OPQ32r", &[PERSONALITY]),
    ]);
    let config = RerankerConfig::new("test-model").with_enforce_balance(true);
    let reranker = Reranker::new(ScriptedModel::replying("[1, 0]"), config).unwrap();

    let outcome = reranker
        .rerank("developer with team leadership", &candidates)
        .await;

    assert_eq!(outcome.status, RerankStatus::Reranked);
    assert_eq!(names(&outcome), vec!["Spring", "Core Java", "OPQ32r"]);
}

#[tokio::test]
async fn test_balance_not_enforced_by_default() {
    let candidates = batch(vec![
        record("Core Java", &[KNOWLEDGE]),
        record("OPQ32r", &[PERSONALITY]),
    ]);
    let reranker = reranker(ScriptedModel::replying("[0]"));

    let outcome = reranker
        .rerank("developer with team leadership", &candidates)
        .await;

    assert_eq!(names(&outcome), vec!["Core Java"]);
}

#[test]
fn test_repair_replaces_last_item_when_full() {
    let mut records: Vec<_> = (0..10).map(|i| record(&format!("Tech {i}"), &[KNOWLEDGE])).collect();
    records.push(record("OPQ32r", &[PERSONALITY]));
    let candidates = batch(records);
    let intent = QueryIntent::detect("developer with leadership");

    let repaired = repair_balance(intent, (0..10).collect(), &candidates, 10);

    assert_eq!(repaired.len(), 10);
    assert_eq!(repaired[8], 8);
    assert_eq!(repaired[9], 10);
}

#[test]
fn test_repair_keeps_only_carrier_of_other_family() {
    let mut records: Vec<_> = (0..9).map(|i| record(&format!("General {i}"), &["Unknown"])).collect();
    records.push(record("Core Java", &[KNOWLEDGE]));
    records.push(record("OPQ32r", &[PERSONALITY]));
    let candidates = batch(records);
    let intent = QueryIntent::detect("developer with team leadership");

    let repaired = repair_balance(intent, (0..10).collect(), &candidates, 10);

    assert_eq!(repaired.len(), 10);
    assert!(repaired.contains(&9));
    assert!(repaired.contains(&10));
    assert!(!repaired.contains(&8));
}

#[test]
fn test_repair_skips_when_every_item_is_a_sole_carrier() {
    let candidates = batch(vec![
        record("Core Java", &[KNOWLEDGE]),
        record("OPQ32r", &[PERSONALITY]),
    ]);
    let intent = QueryIntent::detect("developer with team leadership");

    assert_eq!(repair_balance(intent, vec![0], &candidates, 1), vec![0]);
}

#[test]
fn test_repair_leaves_single_intent_alone() {
    let candidates = java_and_opq();
    let intent = QueryIntent::detect("java developer");

    assert_eq!(repair_balance(intent, vec![0], &candidates, 10), vec![0]);
}

#[test]
fn test_repair_without_available_family_is_noop() {
    let candidates = technical_batch(3);
    let intent = QueryIntent::detect("developer with leadership");

    assert_eq!(repair_balance(intent, vec![2, 0], &candidates, 10), vec![2, 0]);
}

// --- config ---

#[test]
fn test_config_validation() {
    assert!(RerankerConfig::default().validate().is_ok());
    assert!(RerankerConfig::new("  ").validate().is_err());
    assert!(
        RerankerConfig::new("m")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err()
    );
    assert!(Reranker::new(ScriptedModel::hanging(), RerankerConfig::new("")).is_err());
}

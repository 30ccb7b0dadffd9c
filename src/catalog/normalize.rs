//! Record normalization.
//!
//! Raw catalog metadata arrives in several shapes (scraper output, cleaned JSON,
//! store payloads). Everything funnels through [`normalize`] so ingestion and
//! retrieval agree on one canonical [`AssessmentRecord`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::error::NormalizeError;
use super::model::{AssessmentRecord, Support};
use crate::constants::{MAX_DESCRIPTION_CHARS, UNKNOWN_TEST_TYPE};

const URL_KEYS: &[&str] = &["url", "assessment_url", "assessmentUrl"];
const NAME_KEYS: &[&str] = &["name", "assessment_name", "assessmentName"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const DURATION_KEYS: &[&str] = &["duration", "assessment_length"];
const ADAPTIVE_KEYS: &[&str] = &["adaptive_support", "adaptiveSupport", "adaptive/irt_support"];
const REMOTE_KEYS: &[&str] = &["remote_support", "remoteSupport", "remote_testing"];
const TEST_TYPE_KEYS: &[&str] = &["test_type", "testType", "testTypes", "test_types"];

const NEGATIVE_WORDS: &[&str] = &["no", "not", "n", "false", "unsupported", "none"];
const AFFIRMATIVE_WORDS: &[&str] = &["yes", "y", "true", "supported"];
const NEGATIVE_SYMBOLS: &[&str] = &["🔴", "❌"];
const AFFIRMATIVE_SYMBOLS: &[&str] = &["🟢", "✅", "✔"];

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static pattern is valid"));

/// Converts raw metadata into an [`AssessmentRecord`].
///
/// `url` and `name` are required; every other field degrades to a safe default.
pub fn normalize(raw: &Map<String, Value>) -> Result<AssessmentRecord, NormalizeError> {
    let url = required_text(raw, URL_KEYS, "url")?;
    let name = required_text(raw, NAME_KEYS, "name")?;

    let description = lookup(raw, DESCRIPTION_KEYS)
        .and_then(Value::as_str)
        .map(|d| truncate_chars(d.trim(), MAX_DESCRIPTION_CHARS))
        .unwrap_or_default();

    Ok(AssessmentRecord {
        url,
        name,
        description,
        duration: parse_duration(lookup(raw, DURATION_KEYS)),
        adaptive_support: normalize_support(lookup(raw, ADAPTIVE_KEYS)),
        remote_support: normalize_support(lookup(raw, REMOTE_KEYS)),
        test_types: coerce_test_types(lookup(raw, TEST_TYPE_KEYS)),
    })
}

/// Minutes from a numeric or human-readable duration; `0` when absent or unparsable.
///
/// For text, the first run of digits wins: `"Approximate Completion Time in minutes = 49"` → `49`.
pub fn parse_duration(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => FIRST_INTEGER
            .find(s)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// Maps textual, symbolic and boolean markers onto [`Support`].
///
/// Text is split into words: any negative word or symbol anywhere wins
/// ("Not currently supported", "No (supported in v2)"), and anything
/// unrecognised is `No`.
pub fn normalize_support(value: Option<&Value>) -> Support {
    let text = match value {
        Some(Value::Bool(true)) => return Support::Yes,
        Some(Value::String(s)) => s.trim().to_lowercase(),
        _ => return Support::No,
    };

    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if NEGATIVE_SYMBOLS.iter().any(|m| text.contains(m))
        || words.iter().any(|w| NEGATIVE_WORDS.contains(w))
    {
        return Support::No;
    }
    if AFFIRMATIVE_SYMBOLS.iter().any(|m| text.contains(m))
        || words.iter().any(|w| AFFIRMATIVE_WORDS.contains(w))
    {
        return Support::Yes;
    }
    Support::No
}

/// Splits comma-separated labels (or passes a list through), preserving order.
///
/// Empty or absent input yields the single sentinel label.
pub fn coerce_test_types(value: Option<&Value>) -> Vec<String> {
    let types: Vec<String> = match value {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    if types.is_empty() {
        vec![UNKNOWN_TEST_TYPE.to_string()]
    } else {
        types
    }
}

/// Truncates on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn lookup<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| raw.get(*k))
        .find(|v| !v.is_null())
}

fn required_text(
    raw: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<String, NormalizeError> {
    match lookup(raw, keys) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) | None => Err(NormalizeError::MissingField { field }),
        Some(_) => Err(NormalizeError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        }),
    }
}

//! Parsing of the model's selection reply.
//!
//! The contract is a bare JSON array of integer ids. Anything that is not an
//! array at the top level is unparsable; elements that are not integral ids are
//! dropped alongside out-of-batch ids by the caller.

use serde_json::Value;

use super::error::RerankError;

/// Parses a reply into raw ids in model order.
///
/// Non-integral or negative elements are skipped here. Duplicates and
/// out-of-batch ids are left for [`validate_selection`].
pub fn parse_selection(reply: &str) -> Result<Vec<u64>, RerankError> {
    let body = strip_code_fence(reply);
    let value: Value = serde_json::from_str(body).map_err(|e| RerankError::Unparsable {
        reason: e.to_string(),
    })?;

    match value {
        Value::Array(items) => Ok(items.iter().filter_map(as_id).collect()),
        other => Err(RerankError::Unparsable {
            reason: format!("expected a JSON array, got {}", kind(&other)),
        }),
    }
}

/// Keeps ids inside `0..batch_len`, first occurrence only, model order, at most `cap`.
pub fn validate_selection(ids: &[u64], batch_len: usize, cap: usize) -> Vec<usize> {
    let mut seen = vec![false; batch_len];
    let mut valid = Vec::with_capacity(cap.min(ids.len()));

    for &id in ids {
        if valid.len() == cap {
            break;
        }
        let Ok(idx) = usize::try_from(id) else {
            continue;
        };
        if idx < batch_len && !seen[idx] {
            seen[idx] = true;
            valid.push(idx);
        }
    }
    valid
}

fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

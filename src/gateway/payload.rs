//! Wire schema.
//!
//! Responses always use the camelCase field names below. Deserialisation also
//! accepts the snake_case and `assessment*` spellings some clients send, and
//! fills optional fields with their defaults.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::normalize::normalize_support;
use crate::catalog::{AssessmentRecord, Support};
use crate::constants::UNKNOWN_TEST_TYPE;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    #[serde(default, alias = "recommended_assessments")]
    pub recommended_assessments: Vec<AssessmentItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentItem {
    #[serde(alias = "assessmentUrl", alias = "assessment_url")]
    pub url: String,

    #[serde(alias = "assessmentName", alias = "assessment_name")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub duration: u32,

    #[serde(default, alias = "adaptive_support", deserialize_with = "lenient_support")]
    pub adaptive_support: Support,

    #[serde(default, alias = "remote_support", deserialize_with = "lenient_support")]
    pub remote_support: Support,

    #[serde(default = "unknown_test_type", alias = "test_type")]
    pub test_type: Vec<String>,
}

/// Accepts any yes/no spelling the catalog normalizer understands.
fn lenient_support<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Support, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(normalize_support(value.as_ref()))
}

fn unknown_test_type() -> Vec<String> {
    vec![UNKNOWN_TEST_TYPE.to_string()]
}

impl From<AssessmentRecord> for AssessmentItem {
    fn from(record: AssessmentRecord) -> Self {
        Self {
            url: record.url,
            name: record.name,
            description: record.description,
            duration: record.duration,
            adaptive_support: record.adaptive_support,
            remote_support: record.remote_support,
            test_type: record.test_types,
        }
    }
}

impl RecommendResponse {
    pub fn from_records(records: Vec<AssessmentRecord>) -> Self {
        Self {
            recommended_assessments: records.into_iter().map(AssessmentItem::from).collect(),
        }
    }
}

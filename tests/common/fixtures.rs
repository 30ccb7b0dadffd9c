use serde_json::{Value, json};

use shortlist::catalog::{AssessmentRecord, Support};

pub const KNOWLEDGE: &str = "Knowledge & Skills";
pub const PERSONALITY: &str = "Personality & Behavior";

pub fn record(name: &str, test_type: &str) -> AssessmentRecord {
    AssessmentRecord {
        url: format!(
            "https://www.shl.com/products/product-catalog/view/{}/",
            name.to_lowercase().replace(' ', "-")
        ),
        name: name.to_string(),
        description: format!("{name} assessment."),
        duration: 20,
        adaptive_support: Support::No,
        remote_support: Support::Yes,
        test_types: vec![test_type.to_string()],
    }
}

/// Alternating technical / behavioral catalog of `n` entries.
pub fn mixed_catalog(n: usize) -> Vec<AssessmentRecord> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                record(&format!("Skill Test {i}"), KNOWLEDGE)
            } else {
                record(&format!("Behavior Test {i}"), PERSONALITY)
            }
        })
        .collect()
}

/// Raw scraped entries in the shapes the ingestion file carries.
pub fn raw_catalog() -> Value {
    json!([
        {
            "name": "Core Java (Advanced Level) (New)",
            "url": "https://www.shl.com/products/product-catalog/view/core-java-advanced-level-new/",
            "description": "Multi-choice test that measures the knowledge of Java class design, exceptions, generics and collections.",
            "duration": "Approximate Completion Time in minutes = 13",
            "adaptive/irt_support": "🔴",
            "remote_testing": "🟢",
            "test_type": "Knowledge & Skills"
        },
        {
            "name": "Occupational Personality Questionnaire OPQ32r",
            "url": "https://www.shl.com/products/product-catalog/view/occupational-personality-questionnaire-opq32r/",
            "description": "Describes behavioural style at work, including leadership and teamwork preferences.",
            "duration": "Approximate Completion Time in minutes = 25",
            "adaptive/irt_support": "No",
            "remote_testing": "Yes",
            "test_type": ["Personality & Behavior"]
        },
        {
            "name": "Verify G+",
            "url": "https://www.shl.com/products/product-catalog/view/verify-g/",
            "description": "General ability test covering numerical, deductive and inductive reasoning.",
            "duration": 36,
            "adaptive_support": "Supported",
            "remote_support": "✅",
            "test_type": "Ability & Aptitude"
        },
        { "description": "entry without name or url" },
        "not an object"
    ])
}

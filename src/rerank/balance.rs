//! Technical / behavioral balance for mixed-intent queries.
//!
//! The prompt asks the model to cover both families when a query mixes them.
//! [`repair_balance`] optionally checks that it did and patches the selection
//! when it did not.

use tracing::debug;

use crate::retrieval::Candidate;

const TECHNICAL_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "programmer",
    "programming",
    "coding",
    "code",
    "software",
    "java",
    "python",
    "javascript",
    "sql",
    "selenium",
    "excel",
    "technical",
    "analyst",
    "data",
    "finance",
    "accounting",
    "tools",
    "cloud",
    "devops",
];

const BEHAVIORAL_KEYWORDS: &[&str] = &[
    "leadership",
    "leader",
    "personality",
    "behavior",
    "behaviour",
    "teamwork",
    "team player",
    "collaborat",
    "communication",
    "interpersonal",
    "soft skill",
    "culture",
    "attitude",
    "stakeholder",
    "motivat",
    "manage people",
    "people management",
];

/// Category family of a test-type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    Technical,
    Behavioral,
    Other,
}

impl CategoryFamily {
    pub fn of(label: &str) -> Self {
        let label = label.to_lowercase();
        if ["knowledge", "skill", "simulation", "ability", "aptitude"]
            .iter()
            .any(|k| label.contains(k))
        {
            CategoryFamily::Technical
        } else if [
            "personality",
            "behavio",
            "situational",
            "judgement",
            "judgment",
            "competenc",
            "360",
        ]
        .iter()
        .any(|k| label.contains(k))
        {
            CategoryFamily::Behavioral
        } else {
            CategoryFamily::Other
        }
    }
}

/// Which families a query signals, by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryIntent {
    pub technical: bool,
    pub behavioral: bool,
}

impl QueryIntent {
    pub fn detect(query: &str) -> Self {
        let query = query.to_lowercase();
        Self {
            technical: TECHNICAL_KEYWORDS.iter().any(|k| contains_word(&query, k)),
            behavioral: BEHAVIORAL_KEYWORDS.iter().any(|k| contains_word(&query, k)),
        }
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        self.technical && self.behavioral
    }
}

/// Whether any of the candidate's test types belongs to `family`.
pub fn covers(candidate: &Candidate, family: CategoryFamily) -> bool {
    candidate
        .record
        .test_types
        .iter()
        .any(|t| CategoryFamily::of(t) == family)
}

/// Adds the best-ranked candidate of each family missing from a mixed-intent
/// selection.
///
/// `selection` holds indices into `candidates`. Additions go to the end; when
/// the selection is already at `max`, the last item that is not the only
/// carrier of a family makes room. Non-mixed queries and already balanced
/// selections are returned unchanged.
pub fn repair_balance(
    intent: QueryIntent,
    mut selection: Vec<usize>,
    candidates: &[Candidate],
    max: usize,
) -> Vec<usize> {
    if !intent.is_mixed() || selection.is_empty() {
        return selection;
    }

    for family in [CategoryFamily::Technical, CategoryFamily::Behavioral] {
        if selection.iter().any(|&i| covers(&candidates[i], family)) {
            continue;
        }

        let Some(extra) = (0..candidates.len())
            .find(|i| !selection.contains(i) && covers(&candidates[*i], family))
        else {
            debug!(?family, "No candidate available to balance selection");
            continue;
        };

        if selection.len() >= max {
            let Some(position) = (0..selection.len())
                .rev()
                .find(|&p| !is_sole_carrier(&selection, p, candidates))
            else {
                debug!(?family, "Every selected item carries a family, cannot balance");
                continue;
            };
            selection.remove(position);
        }
        selection.push(extra);
        debug!(?family, local_id = extra, "Balanced selection");
    }

    selection
}

/// Whether removing `selection[position]` would leave a balanced family uncovered.
fn is_sole_carrier(selection: &[usize], position: usize, candidates: &[Candidate]) -> bool {
    let candidate = &candidates[selection[position]];
    [CategoryFamily::Technical, CategoryFamily::Behavioral]
        .into_iter()
        .filter(|&family| covers(candidate, family))
        .any(|family| {
            !selection
                .iter()
                .enumerate()
                .any(|(p, &i)| p != position && covers(&candidates[i], family))
        })
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        !haystack[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    })
}

use crate::catalog::AssessmentRecord;

/// Per-request view of a catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position in the retrieval batch; see the module docs.
    pub local_id: usize,
    /// Similarity score reported by the store.
    pub score: f32,
    pub record: AssessmentRecord,
}

impl Candidate {
    pub fn new(local_id: usize, score: f32, record: AssessmentRecord) -> Self {
        Self {
            local_id,
            score,
            record,
        }
    }
}

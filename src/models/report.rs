use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredProperty;

/// A record that could not be coerced or validated into a scoreable shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedProperty {
    /// Index of the record in the input batch
    pub property_index: usize,
    /// Present when the record carried a readable id despite failing
    pub property_id: Option<String>,
    pub reason: String,
}

/// Outcome of a full scoring run: partial success by design
///
/// Everything that could be scored is ranked; everything that could not
/// is listed with its index and reason. A bad record never aborts the
/// batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub ranked_properties: Vec<ScoredProperty>,
    pub validation_errors: Vec<RejectedProperty>,
    pub total_processed: usize,
    pub total_failed_validation: usize,
}

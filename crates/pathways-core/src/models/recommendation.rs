use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::therapy::{EvidenceLevel, TherapyCategory};

/// Strength of a recommendation, derived from its match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Score at or above which a therapy is `High`.
    pub const HIGH_THRESHOLD: i32 = 5;
    /// Score at or above which a therapy is at least `Medium`.
    pub const MEDIUM_THRESHOLD: i32 = 2;

    pub fn from_score(score: i32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Priority::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Sort key: high sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// One suggested therapy, produced fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Recommendation {
    pub therapy: String,
    pub category: TherapyCategory,
    pub priority: Priority,
    pub reasoning: String,
    pub evidence_level: EvidenceLevel,
    pub estimated_cost: String,
    pub insurance_coverage: String,
    pub research_link: String,
}

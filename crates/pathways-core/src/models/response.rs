use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::profile::{ChildProfile, InsuranceType, SupportLevel};
use super::recommendation::{Priority, Recommendation};

/// The profile as the engine saw it, after defaults were applied.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileSummary {
    pub age: u32,
    pub support_level: SupportLevel,
    pub insurance_type: InsuranceType,
    pub primary_concerns: Vec<String>,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

impl ProfileSummary {
    pub fn new(profile: &ChildProfile, recommendations: &[Recommendation]) -> Self {
        let count = |p: Priority| recommendations.iter().filter(|r| r.priority == p).count();
        Self {
            age: profile.age,
            support_level: profile.support_level,
            insurance_type: profile.insurance_type,
            primary_concerns: profile.primary_concerns.clone(),
            high_priority: count(Priority::High),
            medium_priority: count(Priority::Medium),
            low_priority: count(Priority::Low),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub generated_at: jiff::Timestamp,
    pub profile: ProfileSummary,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResponse {
    pub fn new(profile: &ChildProfile, recommendations: Vec<Recommendation>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            generated_at: jiff::Timestamp::now(),
            profile: ProfileSummary::new(profile, &recommendations),
            recommendations,
        }
    }
}

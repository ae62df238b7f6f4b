use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Qualitative strength of the research behind a therapy.
///
/// Ordered from most to least trusted. Shown to families, never used for
/// ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EvidenceLevel {
    Strong,
    Moderate,
    Emerging,
    Investigational,
}

/// Coarse grouping label, serialized as the display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TherapyCategory {
    Behavioral,
    Communication,
    #[serde(rename = "Sensory/Motor")]
    SensoryMotor,
    Social,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    #[serde(rename = "Family Support")]
    FamilySupport,
    Biomedical,
    Supplements,
    Investigational,
    Medical,
}

impl TherapyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TherapyCategory::Behavioral => "Behavioral",
            TherapyCategory::Communication => "Communication",
            TherapyCategory::SensoryMotor => "Sensory/Motor",
            TherapyCategory::Social => "Social",
            TherapyCategory::MentalHealth => "Mental Health",
            TherapyCategory::FamilySupport => "Family Support",
            TherapyCategory::Biomedical => "Biomedical",
            TherapyCategory::Supplements => "Supplements",
            TherapyCategory::Investigational => "Investigational",
            TherapyCategory::Medical => "Medical",
        }
    }
}

impl fmt::Display for TherapyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use ts_rs::TS;

use crate::error::CoreError;

/// DSM-5 support-need tier. `Unsure` is a valid answer, not a missing one.
///
/// Serialized lowercase; parsing (including from JSON) ignores case and
/// surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SupportLevel {
    Level1,
    Level2,
    Level3,
    Unsure,
}

impl SupportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLevel::Level1 => "level1",
            SupportLevel::Level2 => "level2",
            SupportLevel::Level3 => "level3",
            SupportLevel::Unsure => "unsure",
        }
    }
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level1" => Ok(SupportLevel::Level1),
            "level2" => Ok(SupportLevel::Level2),
            "level3" => Ok(SupportLevel::Level3),
            "unsure" => Ok(SupportLevel::Unsure),
            _ => Err(CoreError::InvalidSupportLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for SupportLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// How the family pays for services. Accepted and echoed, but not scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum InsuranceType {
    Private,
    Medicaid,
    Mixed,
    SelfPay,
}

impl FromStr for InsuranceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(InsuranceType::Private),
            "medicaid" => Ok(InsuranceType::Medicaid),
            "mixed" => Ok(InsuranceType::Mixed),
            "selfpay" => Ok(InsuranceType::SelfPay),
            _ => Err(CoreError::InvalidInsuranceType(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for InsuranceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// A fully populated child profile, the input to recommendation generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChildProfile {
    /// Age in whole years.
    pub age: u32,
    /// Concern identifiers from the intake picklist.
    pub primary_concerns: Vec<String>,
    /// Therapies already in use. Keys, aliases, or free text.
    pub current_therapies: Vec<String>,
    pub support_level: SupportLevel,
    #[serde(rename = "hasGIIssues")]
    pub has_gi_issues: bool,
    pub has_sensory_issues: bool,
    pub has_sleep_issues: bool,
    pub interested_in_biomedical: bool,
    pub insurance_type: InsuranceType,
    pub budget_concern: bool,
}

/// Raw intake answers as submitted. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileRequest {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub primary_concerns: Option<Vec<String>>,
    #[serde(default)]
    pub current_therapies: Option<Vec<String>>,
    #[serde(default)]
    pub support_level: Option<SupportLevel>,
    #[serde(default, rename = "hasGIIssues")]
    pub has_gi_issues: Option<bool>,
    #[serde(default)]
    pub has_sensory_issues: Option<bool>,
    #[serde(default)]
    pub has_sleep_issues: Option<bool>,
    #[serde(default)]
    pub interested_in_biomedical: Option<bool>,
    #[serde(default)]
    pub insurance_type: Option<InsuranceType>,
    #[serde(default)]
    pub budget_concern: Option<bool>,
}

/// Values substituted for fields a request leaves unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub age: u32,
    pub support_level: SupportLevel,
    pub insurance_type: InsuranceType,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            age: 5,
            support_level: SupportLevel::Unsure,
            insurance_type: InsuranceType::Private,
        }
    }
}

impl ProfileRequest {
    /// Fill unset fields from `defaults`. Booleans default to false and
    /// lists to empty.
    pub fn into_profile(self, defaults: &ProfileDefaults) -> ChildProfile {
        ChildProfile {
            age: self.age.unwrap_or(defaults.age),
            primary_concerns: self.primary_concerns.unwrap_or_default(),
            current_therapies: self.current_therapies.unwrap_or_default(),
            support_level: self.support_level.unwrap_or(defaults.support_level),
            has_gi_issues: self.has_gi_issues.unwrap_or(false),
            has_sensory_issues: self.has_sensory_issues.unwrap_or(false),
            has_sleep_issues: self.has_sleep_issues.unwrap_or(false),
            interested_in_biomedical: self.interested_in_biomedical.unwrap_or(false),
            insurance_type: self.insurance_type.unwrap_or(defaults.insurance_type),
            budget_concern: self.budget_concern.unwrap_or(false),
        }
    }
}

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use pathways_core::models::profile::SupportLevel;
use pathways_core::models::therapy::{EvidenceLevel, TherapyCategory};

use crate::concerns::ConcernNormalizer;
use crate::error::KnowledgeBaseError;
use crate::validate::Strictness;

/// Current data file format. Bump this when changing the shape and add a
/// step to [`migrate`].
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Reasoning key every therapy must carry.
pub const DEFAULT_REASONING: &str = "default";

const EMBEDDED_JSON: &str = include_str!("../data/knowledge_base.json");

/// Inclusive `[min, max]` age bound in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeRange(pub u32, pub u32);

impl AgeRange {
    pub fn min(&self) -> u32 {
        self.0
    }

    pub fn max(&self) -> u32 {
        self.1
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.0 && age <= self.1
    }
}

/// Structured insurance coverage, separate from the display prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CoverageClass {
    TypicallyCovered,
    Variable,
    NotCovered,
}

/// When a therapy applies to a profile.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MatchConditions {
    /// Tags worth [`crate::generator::STRONG_MATCH_WEIGHT`] each.
    pub strong_match: Vec<String>,
    /// Tags worth [`crate::generator::WEAK_MATCH_WEIGHT`] each.
    #[serde(default)]
    pub weak_match: Vec<String>,
    /// Reserved. Not consulted by the generator.
    #[serde(default)]
    pub contraindicated: Vec<String>,
    pub age_range: AgeRange,
    /// Empty means every tier qualifies.
    #[serde(default)]
    pub support_levels: Vec<SupportLevel>,
}

/// One row of the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TherapyEntry {
    /// Stable machine identifier, unique within the table.
    pub key: String,
    /// Display name.
    pub therapy: String,
    /// Other names a family might report the therapy under.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: TherapyCategory,
    pub evidence_level: EvidenceLevel,
    pub estimated_cost: String,
    pub insurance_coverage: String,
    pub coverage: CoverageClass,
    pub research_link: String,
    pub conditions: MatchConditions,
    /// Let every support tier through regardless of `support_levels`.
    #[serde(default)]
    pub ignore_support_level_filter: bool,
    /// Rationale per condition tag, plus a mandatory `default`.
    pub reasoning: BTreeMap<String, String>,
}

impl TherapyEntry {
    pub fn is_strong_match(&self, tag: &str) -> bool {
        self.conditions.strong_match.iter().any(|t| t == tag)
    }

    pub fn is_weak_match(&self, tag: &str) -> bool {
        self.conditions.weak_match.iter().any(|t| t == tag)
    }

    pub fn accepts_age(&self, age: u32) -> bool {
        self.conditions.age_range.contains(age)
    }

    pub fn accepts_support_level(&self, level: SupportLevel) -> bool {
        self.ignore_support_level_filter
            || self.conditions.support_levels.is_empty()
            || self.conditions.support_levels.contains(&level)
    }

    /// Lowercased first word of the display name, splitting on whitespace
    /// and hyphens.
    pub fn first_word(&self) -> String {
        self.therapy
            .split(|c: char| c.is_whitespace() || c == '-')
            .find(|w| !w.is_empty())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Rationale for `tag`, falling back to the `default` entry.
    pub fn reasoning_for(&self, tag: Option<&str>) -> &str {
        tag.and_then(|t| self.reasoning.get(t))
            .or_else(|| self.reasoning.get(DEFAULT_REASONING))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// The immutable therapy table and concern vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub format_version: u32,
    pub therapies: Vec<TherapyEntry>,
    /// Intake concern → condition tags.
    #[serde(default)]
    pub concern_map: BTreeMap<String, Vec<String>>,
}

impl KnowledgeBase {
    /// The table bundled with this build, parsed and validated once per
    /// process.
    pub fn embedded() -> &'static KnowledgeBase {
        static EMBEDDED: LazyLock<KnowledgeBase> = LazyLock::new(|| {
            KnowledgeBase::from_json_str(EMBEDDED_JSON)
                .expect("bundled knowledge base must load and validate")
        });
        &EMBEDDED
    }

    /// Parse and validate with [`Strictness::Lenient`].
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        Self::parse(json, Strictness::Lenient)
    }

    /// Parse a data file of any supported format version, migrate it, and
    /// validate it.
    pub fn parse(json: &str, strictness: Strictness) -> Result<Self, KnowledgeBaseError> {
        // Parse as raw JSON so migrations run before deserializing.
        let raw: Value = serde_json::from_str(json)?;
        let on_disk_version = format_version(&raw)?;

        let migrated = migrate(raw, on_disk_version)?;
        let kb: KnowledgeBase = serde_json::from_value(migrated)?;
        let report = kb.validate(strictness)?;

        tracing::info!(
            format_version = kb.format_version,
            therapies = kb.therapies.len(),
            concerns = kb.concern_map.len(),
            reasoning_gaps = report.reasoning_gaps.len(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// Read a data file from disk.
    pub fn load(path: &Path, strictness: Strictness) -> Result<Self, KnowledgeBaseError> {
        let contents = std::fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, strictness)
    }

    pub fn normalizer(&self) -> ConcernNormalizer<'_> {
        ConcernNormalizer::new(&self.concern_map)
    }

    pub fn get(&self, key: &str) -> Option<&TherapyEntry> {
        self.therapies.iter().find(|t| t.key == key)
    }
}

/// Version a raw document declares. A missing field means the unversioned
/// legacy format.
fn format_version(raw: &Value) -> Result<u32, KnowledgeBaseError> {
    let Some(value) = raw.get("formatVersion") else {
        return Ok(0);
    };
    let number = value
        .as_u64()
        .ok_or_else(|| KnowledgeBaseError::InvalidVersion {
            found: value.to_string(),
        })?;
    u32::try_from(number).map_err(|_| KnowledgeBaseError::UnsupportedVersion {
        found: number,
        supported: CURRENT_FORMAT_VERSION,
    })
}

/// Run sequential migrations from `from_version` up to
/// [`CURRENT_FORMAT_VERSION`]. Each step is a pure transform on the raw JSON.
fn migrate(mut json: Value, from_version: u32) -> Result<Value, KnowledgeBaseError> {
    if from_version > CURRENT_FORMAT_VERSION {
        return Err(KnowledgeBaseError::UnsupportedVersion {
            found: from_version.into(),
            supported: CURRENT_FORMAT_VERSION,
        });
    }

    // v0 → v1: machine keys, aliases, structured coverage, support-level override
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| KnowledgeBaseError::Migration("document is not a JSON object".into()))?;
        let therapies = obj
            .get_mut("therapies")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| KnowledgeBaseError::Migration("missing therapies array".into()))?;

        for (index, therapy) in therapies.iter_mut().enumerate() {
            let entry = therapy.as_object_mut().ok_or_else(|| {
                KnowledgeBaseError::Migration(format!("therapy #{index} is not an object"))
            })?;
            let name = entry
                .get("therapy")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let coverage_text = entry
                .get("insuranceCoverage")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            entry
                .entry("key")
                .or_insert_with(|| Value::String(derive_key(&name)));
            entry
                .entry("aliases")
                .or_insert_with(|| Value::Array(Vec::new()));
            entry
                .entry("coverage")
                .or_insert_with(|| Value::String(classify_coverage(&coverage_text).to_string()));
            // v0 tables relied on a name check for ABA at level 1.
            entry.entry("ignoreSupportLevelFilter").or_insert_with(|| {
                Value::Bool(name == "Applied Behavior Analysis (ABA)")
            });
        }

        obj.insert("formatVersion".to_string(), Value::Number(1.into()));
        tracing::info!("migrated knowledge base v0 → v1 (added keys and coverage classes)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

/// `"Occupational Therapy (OT)"` → `"occupational_therapy_ot"`.
fn derive_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

fn classify_coverage(text: &str) -> &'static str {
    if text.contains("Not covered") {
        "not_covered"
    } else if text.contains("Usually covered") || text.contains("Often covered") {
        "typically_covered"
    } else {
        "variable"
    }
}

use std::env;
use std::path::PathBuf;

use pathways_core::models::profile::ProfileDefaults;
use pathways_recommend::validate::Strictness;

/// Runtime settings read from the Lambda environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    /// Data file to load instead of the bundled table.
    pub knowledge_base: Option<PathBuf>,
    pub strictness: Strictness,
    /// Substituted for fields a request leaves out.
    pub defaults: ProfileDefaults,
}

impl LambdaConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let knowledge_base = lookup("PATHWAYS_KNOWLEDGE_BASE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let strictness = match lookup("PATHWAYS_STRICT_REASONING") {
            Some(v) if is_truthy(&v) => Strictness::Strict,
            _ => Strictness::Lenient,
        };

        let mut defaults = ProfileDefaults::default();
        if let Some(age) = lookup("PATHWAYS_DEFAULT_AGE") {
            defaults.age = age
                .trim()
                .parse()
                .map_err(|e| eyre::eyre!("PATHWAYS_DEFAULT_AGE must be a whole number: {e}"))?;
        }
        if let Some(level) = lookup("PATHWAYS_DEFAULT_SUPPORT_LEVEL") {
            defaults.support_level = level.parse()?;
        }
        if let Some(insurance) = lookup("PATHWAYS_DEFAULT_INSURANCE_TYPE") {
            defaults.insurance_type = insurance.parse()?;
        }

        tracing::info!(
            knowledge_base = ?knowledge_base,
            strictness = ?strictness,
            default_age = defaults.age,
            default_support_level = %defaults.support_level,
            "configuration loaded"
        );

        Ok(Self {
            knowledge_base,
            strictness,
            defaults,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}

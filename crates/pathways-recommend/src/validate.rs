//! Load-time authoring checks for the knowledge base.
//!
//! Structural defects (no default reasoning, duplicate keys, inverted age
//! ranges) always fail. A matched tag without its own reasoning text is a
//! gap: lenient validation accepts the `default` rationale as blanket
//! coverage and reports it, strict validation rejects it.

use std::collections::HashSet;

use crate::error::{AuthoringError, KnowledgeBaseError};
use crate::knowledge::{DEFAULT_REASONING, KnowledgeBase};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Tags without reasoning fall back to `default`.
    #[default]
    Lenient,
    /// Every matched tag needs its own reasoning.
    Strict,
}

/// A tag whose rationale will come from the `default` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningGap {
    pub therapy_key: String,
    pub tag: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub reasoning_gaps: Vec<ReasoningGap>,
}

impl KnowledgeBase {
    /// Check the table for authoring defects, collecting every problem
    /// rather than stopping at the first.
    pub fn validate(&self, strictness: Strictness) -> Result<ValidationReport, KnowledgeBaseError> {
        let mut errors = Vec::new();
        let mut report = ValidationReport::default();

        if self.therapies.is_empty() {
            errors.push(AuthoringError::EmptyTable);
        }

        let mut seen_keys = HashSet::new();
        for (index, entry) in self.therapies.iter().enumerate() {
            if entry.therapy.trim().is_empty() {
                errors.push(AuthoringError::MissingName { index });
            }
            if entry.key.trim().is_empty() {
                errors.push(AuthoringError::MissingKey {
                    therapy: entry.therapy.clone(),
                });
            } else if !seen_keys.insert(entry.key.as_str()) {
                errors.push(AuthoringError::DuplicateKey {
                    key: entry.key.clone(),
                });
            }

            let range = entry.conditions.age_range;
            if range.min() > range.max() {
                errors.push(AuthoringError::InvalidAgeRange {
                    therapy: entry.therapy.clone(),
                    min: range.min(),
                    max: range.max(),
                });
            }

            if !entry.reasoning.contains_key(DEFAULT_REASONING) {
                errors.push(AuthoringError::MissingDefaultReasoning {
                    therapy: entry.therapy.clone(),
                });
            }

            let matched = entry
                .conditions
                .strong_match
                .iter()
                .chain(&entry.conditions.weak_match);
            for tag in matched {
                if entry.reasoning.contains_key(tag) {
                    continue;
                }
                match strictness {
                    Strictness::Strict => errors.push(AuthoringError::UncoveredTag {
                        therapy: entry.therapy.clone(),
                        tag: tag.clone(),
                    }),
                    Strictness::Lenient => {
                        tracing::debug!(
                            therapy = %entry.key,
                            tag = %tag,
                            "tag falls back to default reasoning"
                        );
                        report.reasoning_gaps.push(ReasoningGap {
                            therapy_key: entry.key.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
            }
        }

        for (concern, tags) in &self.concern_map {
            if tags.is_empty() {
                errors.push(AuthoringError::EmptyConcernMapping {
                    concern: concern.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(report)
        } else {
            Err(KnowledgeBaseError::Invalid(errors))
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("knowledge base is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "knowledge base format_version {found} is newer than this build supports ({supported})"
    )]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("knowledge base formatVersion must be a non-negative integer, got {found}")]
    InvalidVersion { found: String },

    #[error("knowledge base migration failed: {0}")]
    Migration(String),

    #[error("knowledge base failed validation: {}", join_errors(.0))]
    Invalid(Vec<AuthoringError>),
}

/// A defect in how the knowledge base was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    #[error("knowledge base has no therapies")]
    EmptyTable,

    #[error("therapy #{index} has an empty display name")]
    MissingName { index: usize },

    #[error("'{therapy}' has an empty key")]
    MissingKey { therapy: String },

    #[error("key '{key}' is used by more than one therapy")]
    DuplicateKey { key: String },

    #[error("'{therapy}' has age range [{min}, {max}] with min above max")]
    InvalidAgeRange { therapy: String, min: u32, max: u32 },

    #[error("'{therapy}' has no default reasoning")]
    MissingDefaultReasoning { therapy: String },

    #[error("'{therapy}' matches tag '{tag}' but has no reasoning for it")]
    UncoveredTag { therapy: String, tag: String },

    #[error("concern '{concern}' maps to no condition tags")]
    EmptyConcernMapping { concern: String },
}

fn join_errors(errors: &[AuthoringError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

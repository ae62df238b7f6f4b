//! pathways-recommend
//!
//! Rule-based therapy recommendation engine. Pure data and pure functions:
//! a versioned knowledge base of therapies, the concern normalizer that maps
//! intake answers onto condition tags, and the generator that filters,
//! scores, and ranks therapies for a child profile.

pub mod concerns;
pub mod error;
pub mod generator;
pub mod knowledge;
pub mod validate;

use pathways_core::models::profile::ChildProfile;
use pathways_core::models::recommendation::Recommendation;

pub use generator::generate_recommendations;
pub use knowledge::KnowledgeBase;

/// Generate recommendations against the bundled knowledge base.
pub fn recommend(profile: &ChildProfile) -> Vec<Recommendation> {
    generate_recommendations(profile, KnowledgeBase::embedded())
}

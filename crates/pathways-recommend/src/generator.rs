//! Filters, scores, and ranks knowledge-base therapies for a child profile.

use std::collections::HashSet;

use tracing::debug;

use pathways_core::models::profile::ChildProfile;
use pathways_core::models::recommendation::{Priority, Recommendation};

use crate::concerns::ConcernNormalizer;
use crate::knowledge::{CoverageClass, KnowledgeBase, TherapyEntry};

pub const STRONG_MATCH_WEIGHT: i32 = 3;
pub const WEAK_MATCH_WEIGHT: i32 = 1;
/// Subtracted for uncovered therapies when the family is budget-constrained.
pub const BUDGET_PENALTY: i32 = 1;
/// Children younger than this get the `early_intervention` tag.
pub const EARLY_INTERVENTION_AGE: u32 = 5;

/// Tags implied by profile flags rather than chosen concerns.
pub mod tag {
    pub const GI_ISSUES: &str = "gi_issues";
    pub const SENSORY_ISSUES: &str = "sensory_issues";
    pub const SLEEP_ISSUES: &str = "sleep_issues";
    pub const INTERESTED_BIOMEDICAL: &str = "interested_biomedical";
    pub const EARLY_INTERVENTION: &str = "early_intervention";
}

/// Why a therapy was left out. Only used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    AlreadyReceiving,
    OutsideAgeRange,
    SupportLevel,
    NoMatch,
}

/// The profile's condition tags in first-seen order, without duplicates.
///
/// Concerns are expanded in input order, then the flag tags are appended.
/// Each tag can therefore contribute to a therapy's score at most once.
pub fn active_tags<'s>(
    profile: &'s ChildProfile,
    normalizer: &ConcernNormalizer<'s>,
) -> Vec<&'s str> {
    let mut tags: Vec<&'s str> = Vec::new();
    let mut seen: HashSet<&'s str> = HashSet::new();
    let mut push = |t: &'s str| {
        if seen.insert(t) {
            tags.push(t);
        }
    };

    for concern in &profile.primary_concerns {
        for t in normalizer.expand(concern) {
            push(t);
        }
    }

    if profile.has_gi_issues {
        push(tag::GI_ISSUES);
    }
    if profile.has_sensory_issues {
        push(tag::SENSORY_ISSUES);
    }
    if profile.has_sleep_issues {
        push(tag::SLEEP_ISSUES);
    }
    if profile.interested_in_biomedical {
        push(tag::INTERESTED_BIOMEDICAL);
    }
    if profile.age < EARLY_INTERVENTION_AGE {
        push(tag::EARLY_INTERVENTION);
    }

    tags
}

/// Whether any of `current` names this therapy.
///
/// A current-therapy string matches on the entry's key or an alias, or
/// loosely: it is a substring of the display name, or it contains the
/// display name's first word. The loose rule over-matches short strings
/// ("OT" also hits "Probiotics"). Blank strings match nothing.
pub fn already_receiving(entry: &TherapyEntry, current: &[String]) -> bool {
    let name = entry.therapy.to_lowercase();
    let first_word = entry.first_word();

    current
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .any(|t| {
            entry.key.eq_ignore_ascii_case(&t)
                || entry.aliases.iter().any(|a| a.to_lowercase() == t)
                || name.contains(&t)
                || (!first_word.is_empty() && t.contains(&first_word))
        })
}

/// Sum of match weights over `tags`, and the first tag that matched.
pub fn match_score<'t>(entry: &TherapyEntry, tags: &[&'t str]) -> (i32, Option<&'t str>) {
    let mut score = 0;
    let mut matched = None;

    for &t in tags {
        let weight = if entry.is_strong_match(t) {
            STRONG_MATCH_WEIGHT
        } else if entry.is_weak_match(t) {
            WEAK_MATCH_WEIGHT
        } else {
            continue;
        };
        score += weight;
        matched.get_or_insert(t);
    }

    (score, matched)
}

/// [`match_score`] with the budget penalty applied. The penalty only
/// touches therapies that matched at all.
pub fn therapy_score<'t>(
    entry: &TherapyEntry,
    profile: &ChildProfile,
    tags: &[&'t str],
) -> (i32, Option<&'t str>) {
    let (mut score, matched) = match_score(entry, tags);
    if matched.is_some() && profile.budget_concern && entry.coverage == CoverageClass::NotCovered {
        score -= BUDGET_PENALTY;
    }
    (score, matched)
}

fn check(entry: &TherapyEntry, profile: &ChildProfile) -> Result<(), Skip> {
    if already_receiving(entry, &profile.current_therapies) {
        return Err(Skip::AlreadyReceiving);
    }
    if !entry.accepts_age(profile.age) {
        return Err(Skip::OutsideAgeRange);
    }
    if !entry.accepts_support_level(profile.support_level) {
        return Err(Skip::SupportLevel);
    }
    Ok(())
}

/// Rank the knowledge base's therapies for `profile`.
///
/// Output is ordered high, medium, low; within a band, knowledge-base order
/// is kept. An empty list is a normal result.
pub fn generate_recommendations(
    profile: &ChildProfile,
    kb: &KnowledgeBase,
) -> Vec<Recommendation> {
    let normalizer = kb.normalizer();
    let tags = active_tags(profile, &normalizer);

    let mut recommendations = Vec::new();
    for entry in &kb.therapies {
        if let Err(reason) = check(entry, profile) {
            debug!(therapy = %entry.key, ?reason, "therapy skipped");
            continue;
        }

        let (score, matched) = therapy_score(entry, profile, &tags);
        if matched.is_none() {
            debug!(therapy = %entry.key, reason = ?Skip::NoMatch, "therapy skipped");
            continue;
        }

        recommendations.push(Recommendation {
            therapy: entry.therapy.clone(),
            category: entry.category,
            priority: Priority::from_score(score),
            reasoning: entry.reasoning_for(matched).to_string(),
            evidence_level: entry.evidence_level,
            estimated_cost: entry.estimated_cost.clone(),
            insurance_coverage: entry.insurance_coverage.clone(),
            research_link: entry.research_link.clone(),
        });
    }

    // Stable: ties keep knowledge-base order.
    recommendations.sort_by_key(|r| r.priority.rank());

    debug!(
        tags = tags.len(),
        recommendations = recommendations.len(),
        "recommendations generated"
    );
    recommendations
}

use pathways_core::models::profile::{ChildProfile, InsuranceType, SupportLevel};
use pathways_core::models::recommendation::{Priority, Recommendation};
use pathways_recommend::generator::{active_tags, match_score, therapy_score};
use pathways_recommend::knowledge::CoverageClass;
use pathways_recommend::{KnowledgeBase, generate_recommendations, recommend};

const ABA: &str = "Applied Behavior Analysis (ABA)";
const SPEECH: &str = "Speech-Language Therapy";
const AAC: &str = "AAC (Augmentative & Alternative Communication)";
const PARENT_TRAINING: &str = "Parent Training (e.g., PCIT, PRT)";
const SULFORAPHANE: &str = "Sulforaphane Supplementation";
const MELATONIN: &str = "Melatonin for Sleep";
const HBOT: &str = "HBOT (Hyperbaric Oxygen Therapy)";

fn profile() -> ChildProfile {
    ChildProfile {
        age: 8,
        primary_concerns: vec![],
        current_therapies: vec![],
        support_level: SupportLevel::Level2,
        has_gi_issues: false,
        has_sensory_issues: false,
        has_sleep_issues: false,
        interested_in_biomedical: false,
        insurance_type: InsuranceType::Private,
        budget_concern: false,
    }
}

fn nonverbal_four_year_old() -> ChildProfile {
    ChildProfile {
        age: 4,
        primary_concerns: vec!["nonverbal".to_string()],
        ..profile()
    }
}

/// Every concern and every flag set.
fn everything() -> ChildProfile {
    ChildProfile {
        primary_concerns: KnowledgeBase::embedded()
            .normalizer()
            .known_concerns()
            .map(|(c, _)| c.to_string())
            .collect(),
        has_gi_issues: true,
        has_sensory_issues: true,
        has_sleep_issues: true,
        interested_in_biomedical: true,
        ..profile()
    }
}

fn names(recs: &[Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.therapy.as_str()).collect()
}

fn find<'a>(recs: &'a [Recommendation], therapy: &str) -> Option<&'a Recommendation> {
    recs.iter().find(|r| r.therapy == therapy)
}

#[test]
fn nonverbal_preschooler_gets_communication_supports() {
    let recs = recommend(&nonverbal_four_year_old());

    assert_eq!(
        names(&recs),
        vec![ABA, SPEECH, AAC, PARENT_TRAINING, SULFORAPHANE]
    );
    assert_eq!(find(&recs, SPEECH).unwrap().priority, Priority::High);
    assert_eq!(find(&recs, AAC).unwrap().priority, Priority::High);
    assert_eq!(find(&recs, ABA).unwrap().priority, Priority::High);
    assert_eq!(find(&recs, PARENT_TRAINING).unwrap().priority, Priority::Medium);
    assert_eq!(find(&recs, SULFORAPHANE).unwrap().priority, Priority::Low);
}

#[test]
fn reasoning_comes_from_first_matched_tag() {
    let recs = recommend(&nonverbal_four_year_old());

    // Tags run nonverbal, limited_speech, communication, early_intervention;
    // ABA only knows communication and early_intervention.
    assert_eq!(
        find(&recs, ABA).unwrap().reasoning,
        "ABA includes protocols specifically designed to develop communication skills."
    );
    assert_eq!(
        find(&recs, SPEECH).unwrap().reasoning,
        "SLPs can introduce AAC (augmentative and alternative communication) devices."
    );
}

#[test]
fn weak_tag_without_reasoning_uses_default() {
    let p = ChildProfile {
        primary_concerns: vec!["social".to_string()],
        ..profile()
    };
    let recs = recommend(&p);

    // social_skills comes first and is only a weak match for speech therapy,
    // with no text of its own.
    let speech = find(&recs, SPEECH).unwrap();
    assert_eq!(speech.priority, Priority::Medium);
    assert_eq!(
        speech.reasoning,
        "Speech therapy supports communication development across all levels."
    );
}

#[test]
fn speech_therapy_in_use_is_not_recommended_again() {
    let p = ChildProfile {
        current_therapies: vec!["Speech Therapy".to_string()],
        ..nonverbal_four_year_old()
    };
    let recs = recommend(&p);

    assert!(find(&recs, SPEECH).is_none());
    assert_eq!(names(&recs), vec![ABA, AAC, PARENT_TRAINING, SULFORAPHANE]);
}

#[test]
fn therapies_in_use_never_reappear() {
    let kb = KnowledgeBase::embedded();
    for entry in &kb.therapies {
        for reported in [entry.therapy.clone(), entry.key.clone(), entry.therapy.to_uppercase()] {
            let p = ChildProfile {
                current_therapies: vec![reported.clone()],
                ..everything()
            };
            let recs = generate_recommendations(&p, kb);
            assert!(
                find(&recs, &entry.therapy).is_none(),
                "{} recommended while reporting '{reported}'",
                entry.therapy
            );
        }
    }
}

#[test]
fn aliases_exclude_their_therapy() {
    let p = ChildProfile {
        current_therapies: vec!["PCIT".to_string(), "fish oil".to_string()],
        ..everything()
    };
    let recs = recommend(&p);

    assert!(find(&recs, PARENT_TRAINING).is_none());
    assert!(find(&recs, "Omega-3 Fatty Acids").is_none());
}

#[test]
fn blank_current_therapies_exclude_nothing() {
    let with_blanks = ChildProfile {
        current_therapies: vec![String::new(), "   ".to_string()],
        ..everything()
    };
    assert_eq!(recommend(&with_blanks), recommend(&everything()));
}

#[test]
fn sleep_flag_alone_puts_melatonin_first() {
    let p = ChildProfile {
        has_sleep_issues: true,
        ..profile()
    };
    let recs = recommend(&p);

    let melatonin = &recs[0];
    assert_eq!(melatonin.therapy, MELATONIN);
    // 3 points lands in the medium band.
    assert_eq!(melatonin.priority, Priority::Medium);
    // Everything else only weak-matches sleep_issues.
    assert!(recs[1..].iter().all(|r| r.priority == Priority::Low));
    assert_eq!(
        names(&recs),
        vec![
            MELATONIN,
            "Dietary Modifications",
            "Psychiatric Medication Evaluation"
        ]
    );
}

#[test]
fn age_range_is_inclusive() {
    let sleepy = |age| ChildProfile {
        age,
        has_sleep_issues: true,
        ..profile()
    };

    assert!(find(&recommend(&sleepy(1)), MELATONIN).is_none());
    assert!(find(&recommend(&sleepy(2)), MELATONIN).is_some());
    assert!(find(&recommend(&sleepy(99)), MELATONIN).is_some());
    assert!(find(&recommend(&sleepy(100)), MELATONIN).is_none());
}

#[test]
fn budget_concern_costs_uncovered_therapies_one_point() {
    let kb = KnowledgeBase::embedded();
    let base = ChildProfile {
        interested_in_biomedical: true,
        ..profile()
    };
    let budget = ChildProfile {
        budget_concern: true,
        ..base.clone()
    };
    let tags = active_tags(&base, &kb.normalizer());

    for entry in &kb.therapies {
        let (without, _) = therapy_score(entry, &base, &tags);
        let (with, _) = therapy_score(entry, &budget, &tags);
        if without == 0 {
            assert_eq!(with, 0, "{} scored without matching", entry.therapy);
        } else if entry.coverage == CoverageClass::NotCovered {
            assert_eq!(with, without - 1, "{}", entry.therapy);
        } else {
            assert_eq!(with, without, "{}", entry.therapy);
        }
    }

    for key in ["sulforaphane", "probiotics", "omega_3", "hbot"] {
        let entry = kb.get(key).unwrap();
        assert_eq!(therapy_score(entry, &base, &tags).0, 3);
        assert_eq!(therapy_score(entry, &budget, &tags).0, 2);
    }
}

#[test]
fn budget_concern_can_demote_a_band() {
    let base = ChildProfile {
        primary_concerns: vec!["behavior".to_string()],
        has_gi_issues: true,
        has_sleep_issues: true,
        ..profile()
    };
    let budget = ChildProfile {
        budget_concern: true,
        ..base.clone()
    };

    // gi 3 + behavioral 1 + sleep 1 = 5
    let diet = "Dietary Modifications";
    assert_eq!(find(&recommend(&base), diet).unwrap().priority, Priority::High);
    assert_eq!(find(&recommend(&budget), diet).unwrap().priority, Priority::Medium);
}

#[test]
fn penalty_to_zero_still_recommends() {
    let p = ChildProfile {
        primary_concerns: vec!["attention".to_string()],
        budget_concern: true,
        ..profile()
    };
    let recs = recommend(&p);

    let omega = find(&recs, "Omega-3 Fatty Acids").unwrap();
    assert_eq!(omega.priority, Priority::Low);
}

#[test]
fn output_is_ordered_by_priority() {
    let recs = recommend(&everything());
    assert!(!recs.is_empty());
    assert!(
        recs.windows(2)
            .all(|w| w[0].priority.rank() <= w[1].priority.rank())
    );
}

#[test]
fn ties_keep_knowledge_base_order() {
    let kb = KnowledgeBase::embedded();
    let recs = recommend(&everything());
    let position = |name: &str| kb.therapies.iter().position(|t| t.therapy == name).unwrap();

    for pair in recs.windows(2) {
        if pair[0].priority == pair[1].priority {
            assert!(position(&pair[0].therapy) < position(&pair[1].therapy));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for p in [profile(), nonverbal_four_year_old(), everything()] {
        assert_eq!(recommend(&p), recommend(&p));
    }
}

#[test]
fn no_concerns_yields_nothing() {
    assert!(recommend(&profile()).is_empty());
}

#[test]
fn unknown_concerns_yield_nothing() {
    let p = ChildProfile {
        primary_concerns: vec!["stamp_collecting".to_string()],
        ..profile()
    };
    assert!(recommend(&p).is_empty());
}

#[test]
fn age_outside_every_range_yields_nothing() {
    let p = ChildProfile {
        age: 120,
        ..everything()
    };
    assert!(recommend(&p).is_empty());
}

#[test]
fn concern_spelled_as_tag_passes_through() {
    let p = ChildProfile {
        primary_concerns: vec!["handwriting".to_string()],
        ..profile()
    };
    let recs = recommend(&p);

    assert_eq!(names(&recs), vec!["Occupational Therapy (OT)"]);
    assert_eq!(
        recs[0].reasoning,
        "OTs are specialists in handwriting and fine motor coordination."
    );
}

#[test]
fn overlapping_concerns_score_each_tag_once() {
    let kb = KnowledgeBase::embedded();
    let p = ChildProfile {
        primary_concerns: vec![
            "communication".to_string(),
            "nonverbal".to_string(),
            "speech_delay".to_string(),
        ],
        ..profile()
    };
    let tags = active_tags(&p, &kb.normalizer());

    assert_eq!(
        tags,
        vec!["communication", "speech_delay", "nonverbal", "limited_speech"]
    );

    let (score, matched) = match_score(kb.get("aac").unwrap(), &tags);
    assert_eq!(score, 9);
    assert_eq!(matched, Some("communication"));
}

#[test]
fn flags_and_age_add_tags_in_order() {
    let kb = KnowledgeBase::embedded();
    let p = ChildProfile {
        age: 3,
        primary_concerns: vec!["sleep".to_string()],
        has_gi_issues: true,
        has_sensory_issues: true,
        has_sleep_issues: true,
        interested_in_biomedical: true,
        ..profile()
    };

    assert_eq!(
        active_tags(&p, &kb.normalizer()),
        vec![
            "sleep_issues",
            "gi_issues",
            "sensory_issues",
            "interested_biomedical",
            "early_intervention",
        ]
    );
}

#[test]
fn support_level_filter_skips_unlisted_tiers() {
    let biomedical = |support_level| ChildProfile {
        support_level,
        interested_in_biomedical: true,
        ..profile()
    };

    assert!(find(&recommend(&biomedical(SupportLevel::Level1)), HBOT).is_none());
    assert!(find(&recommend(&biomedical(SupportLevel::Unsure)), HBOT).is_none());
    assert!(find(&recommend(&biomedical(SupportLevel::Level3)), HBOT).is_some());
}

#[test]
fn aba_is_offered_at_level_one() {
    let p = ChildProfile {
        primary_concerns: vec!["behavior".to_string()],
        support_level: SupportLevel::Level1,
        ..profile()
    };
    let recs = recommend(&p);

    assert_eq!(find(&recs, ABA).unwrap().priority, Priority::Medium);
}

#[test]
fn insurance_type_does_not_change_output() {
    let medicaid = ChildProfile {
        insurance_type: InsuranceType::Medicaid,
        ..everything()
    };
    assert_eq!(recommend(&medicaid), recommend(&everything()));
}

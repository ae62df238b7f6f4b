use pathways_recommend::KnowledgeBase;

#[test]
fn known_concern_expands_to_mapped_tags() {
    let kb = KnowledgeBase::embedded();
    let normalizer = kb.normalizer();

    assert_eq!(
        normalizer.expand("aggression"),
        vec!["behavioral_challenges", "severe_behavioral_challenges"]
    );
    assert_eq!(
        normalizer.expand("nonverbal"),
        vec!["nonverbal", "limited_speech", "communication"]
    );
}

#[test]
fn unknown_concern_passes_through() {
    let kb = KnowledgeBase::embedded();
    let normalizer = kb.normalizer();

    assert_eq!(normalizer.expand("handwriting"), vec!["handwriting"]);
    assert_eq!(normalizer.expand(""), vec![""]);
}

#[test]
fn expansion_is_never_empty() {
    let kb = KnowledgeBase::embedded();
    let normalizer = kb.normalizer();

    for (concern, tags) in normalizer.known_concerns() {
        assert!(!tags.is_empty(), "{concern}");
        assert!(!normalizer.expand(concern).is_empty());
    }
}

#[test]
fn known_concerns_are_sorted() {
    let kb = KnowledgeBase::embedded();
    let concerns: Vec<&str> = kb.normalizer().known_concerns().map(|(c, _)| c).collect();

    assert_eq!(concerns.len(), 18);
    assert_eq!(concerns.first(), Some(&"aggression"));
    assert!(concerns.windows(2).all(|w| w[0] < w[1]));
}

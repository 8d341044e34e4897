use bid_insight::{
    classify::{Classifier, SectionMap, SectionRule, classify, default_rules, score, section_title},
    text::{Sentence, split_sentences},
};

fn sentences(texts: &[&str]) -> Vec<Sentence> {
    texts
        .iter()
        .enumerate()
        .map(|(index, t)| Sentence {
            index,
            text: t.to_string(),
        })
        .collect()
}

#[test]
fn boq_rule_with_half_coverage_is_emitted() {
    let rules = vec![SectionRule::new("boq", &["boq", "pricing"]).with_min_confidence(0.2)];
    let s = sentences(&["The BOQ lists item rates.", "Unrelated clause about delivery."]);
    let out = classify(&s, &rules).unwrap();

    let boq = out.get("boq").expect("boq emitted");
    assert_eq!(boq.keywords_found, vec!["boq"]);
    assert_eq!(boq.importance_score, 0.5);
    assert_eq!(boq.title, "Bill of Quantities");
    assert_eq!(boq.summary, "The BOQ lists item rates.");
}

#[test]
fn keywords_match_whole_words_only() {
    let rules = vec![SectionRule::new("atc_documents", &["ATC"]).with_min_confidence(0.0)];

    let hit = classify(&sentences(&["the ATC documents state the terms."]), &rules).unwrap();
    assert!(hit.contains_key("atc_documents"));

    let miss = classify(&sentences(&["watching the demo is optional."]), &rules).unwrap();
    assert!(miss.is_empty());
}

#[test]
fn multi_word_keywords_match_case_insensitively() {
    let rules = vec![SectionRule::new("boq", &["bill of quantity", "rate"])];
    let out = classify(&sentences(&["See the Bill Of Quantity annex."]), &rules).unwrap();
    assert_eq!(out["boq"].keywords_found, vec!["bill of quantity"]);
}

#[test]
fn raising_min_confidence_never_admits_more_sections() {
    let s = split_sentences(
        "The technical specification is attached. Bidders must hold an ISO certificate. \
         Submission closes Friday. Pricing follows the BOQ.",
    );
    let mut previous = usize::MAX;
    for step in 0..=10 {
        let threshold = step as f64 / 10.0;
        let rules: Vec<SectionRule> = default_rules()
            .into_iter()
            .map(|r| r.with_min_confidence(threshold))
            .collect();
        let n = classify(&s, &rules).unwrap().len();
        assert!(n <= previous, "threshold {threshold} admitted {n} > {previous}");
        previous = n;
    }
}

#[test]
fn disabled_rules_are_skipped() {
    let mut rule = SectionRule::new("certificates", &["certificate"]);
    rule.enabled = false;
    let out = classify(&sentences(&["A certificate is required."]), &[rule]).unwrap();
    assert!(out.is_empty());
}

#[test]
fn sections_are_not_mutually_exclusive() {
    let s = sentences(&["Technical compliance requires an ISO certificate."]);
    let out = classify(&s, &default_rules()).unwrap();
    assert!(out.contains_key("technical_specifications"));
    assert!(out.contains_key("certificates"));
    assert_eq!(
        out["technical_specifications"].keywords_found,
        vec!["compliance", "technical"]
    );
}

#[test]
fn coverage_below_threshold_rejects_section() {
    let rules = vec![SectionRule::new("eligibility", &["eligibility", "experience", "turnover"])
        .with_min_confidence(0.5)];
    let out = classify(&sentences(&["Turnover of 5 crore."]), &rules).unwrap();
    assert!(out.is_empty());
}

#[test]
fn min_confidence_is_clamped() {
    let rules = vec![SectionRule::new("boq", &["boq"]).with_min_confidence(7.0)];
    let out = classify(&sentences(&["BOQ attached."]), &rules).unwrap();
    // clamped to 1.0, full coverage still passes
    assert_eq!(out["boq"].importance_score, 1.0);
}

#[test]
fn rules_without_keywords_emit_nothing_and_do_not_fail() {
    let rules = vec![SectionRule::new("custom_notes", &[])];
    let out = classify(&sentences(&["Anything at all."]), &rules).unwrap();
    assert!(out.is_empty());
}

#[test]
fn unknown_keys_get_title_cased_titles() {
    let rules = vec![SectionRule::new("payment_terms", &["payment"])];
    let out = classify(&sentences(&["Payment within 30 days."]), &rules).unwrap();
    assert_eq!(out["payment_terms"].title, "Payment Terms");
}

#[test]
fn section_summary_is_capped() {
    let text: Vec<String> = (0..8)
        .map(|i| format!("Clause {i} sets the rate for item {i}."))
        .collect();
    let refs: Vec<&str> = text.iter().map(String::as_str).collect();
    let classifier = Classifier::new(&[SectionRule::new("boq", &["rate"])])
        .unwrap()
        .with_summary_sentences(2);
    let out = classifier.classify(&sentences(&refs));
    assert_eq!(split_sentences(&out["boq"].summary).len(), 2);
    assert_eq!(out["boq"].importance_score, 1.0);
}

#[test]
fn empty_document_yields_no_sections() {
    assert!(classify(&[], &default_rules()).unwrap().is_empty());
}

#[test]
fn sections_come_back_in_rule_order() {
    let s = split_sentences("The technical specification is attached. The BOQ pricing is final.");
    let out = classify(&s, &default_rules()).unwrap();
    assert_eq!(
        out.keys().collect::<Vec<_>>(),
        ["technical_specifications", "boq"]
    );

    let reversed: Vec<SectionRule> = default_rules().into_iter().rev().collect();
    let out = classify(&s, &reversed).unwrap();
    assert_eq!(
        out.keys().collect::<Vec<_>>(),
        ["boq", "technical_specifications"]
    );
}

#[test]
fn fallback_title_is_title_cased() {
    assert_eq!(section_title("boq"), "Bill of Quantities");
    assert_eq!(section_title("payment_TERMS"), "Payment Terms");
}

#[test]
fn keywords_found_are_deduped_and_sorted_case_insensitively() {
    let rules = vec![SectionRule::new("atc_documents", &["terms", "ATC", "atc", "Amendment"])];
    let out = classify(
        &sentences(&["Amendment 2 to the ATC.", "The terms are final."]),
        &rules,
    )
    .unwrap();
    assert_eq!(out["atc_documents"].keywords_found, vec!["Amendment", "ATC", "terms"]);
    // duplicate keyword does not dilute coverage
    assert_eq!(out["atc_documents"].importance_score, 1.0);
}

#[test]
fn empty_keyword_rule_uses_sentence_ratio() {
    let s = score(0, 0, 1, 4);
    assert_eq!(s.keyword_coverage, 0.0);
    assert_eq!(s.confidence, 0.25);
    assert_eq!(s.importance, 0.25);
}

#[test]
fn importance_is_rounded() {
    assert_eq!(score(3, 1, 1, 10).importance, 0.333);
}

#[test]
fn section_map_keeps_insertion_order_in_json() {
    let mut m = SectionMap::new();
    m.insert("technical_specifications".to_string(), 1);
    m.insert("boq".to_string(), 2);
    m.insert("technical_specifications".to_string(), 3);
    assert_eq!(m.len(), 2);
    assert_eq!(m["technical_specifications"], 3);

    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, r#"{"technical_specifications":3,"boq":2}"#);
    let back: SectionMap<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

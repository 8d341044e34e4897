use bid_insight::text::{normalize, sentence_texts, split_sentences};

#[test]
fn normalize_collapses_newlines_and_tabs() {
    assert_eq!(normalize("  a\n\n b\t\tc  "), "a b c");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \n\t "), "");
}

#[test]
fn normalize_is_idempotent() {
    let corpus = [
        "",
        "   ",
        " \n\t\r ",
        "Bid\r\nend\tdate\n\n12 March.",
        "EMD\u{00A0}waived\u{2003}for\u{3000}MSE  vendors",
        "\u{00A0}\u{2009}leading and trailing\u{202F}\u{00A0}",
        "already normalized text.",
        "line one.\nline two.\n",
    ];
    for text in corpus {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "input {text:?}");
        assert!(!once.contains("  "));
        assert_eq!(once.trim(), once);
    }
}

#[test]
fn normalize_treats_unicode_spaces_as_whitespace() {
    assert_eq!(normalize("EMD\u{00A0}waived\u{2003}today"), "EMD waived today");
}

#[test]
fn split_keeps_punctuation_and_order() {
    let s = split_sentences("First one. Second!  Third?\nFourth");
    assert_eq!(
        sentence_texts(&s),
        vec!["First one.", "Second!", "Third?", "Fourth"]
    );
    assert_eq!(s[3].index, 3);
}

#[test]
fn split_requires_whitespace_after_punctuation() {
    let s = split_sentences("Version 2.5 is final.Really final.");
    assert_eq!(sentence_texts(&s), vec!["Version 2.5 is final.Really final."]);
}

#[test]
fn abbreviations_over_split() {
    let s = split_sentences("See Fig. 2 for details.");
    assert_eq!(sentence_texts(&s), vec!["See Fig.", "2 for details."]);
}

#[test]
fn blank_input_has_no_sentences() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n ").is_empty());
}

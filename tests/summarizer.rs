use bid_insight::{
    summarize::{score_sentence, select_indices, summarize, word_weights},
    text::split_sentences,
};

#[test]
fn short_text_is_returned_whole_in_order() {
    let text = "Bids open Monday.\nThe EMD is waived!   Queries go to the buyer?";
    assert_eq!(
        summarize(text, 5),
        "Bids open Monday. The EMD is waived! Queries go to the buyer?"
    );
    assert_eq!(summarize(text, 3), summarize(text, 10));
}

#[test]
fn empty_input_gives_empty_summary() {
    assert_eq!(summarize("", 4), "");
    assert_eq!(summarize(" \n\t", 4), "");
}

#[test]
fn frequent_terms_win_and_order_is_preserved() {
    let text = "Weather was pleasant. \
                The tender requires tender security. \
                Lunch was served. \
                Tender security must accompany the tender.";
    let summary = summarize(text, 2);
    assert_eq!(
        summary,
        "The tender requires tender security. Tender security must accompany the tender."
    );
}

#[test]
fn selection_is_reordered_into_document_order() {
    // the last sentence scores highest but must stay last
    let text = "Delivery within thirty days. Filler line. Another filler. \
                Delivery delivery delivery schedule applies.";
    let summary = summarize(text, 2);
    let picked = split_sentences(&summary);
    assert_eq!(picked.len(), 2);
    assert_eq!(picked[0].text, "Delivery within thirty days.");
    assert_eq!(picked[1].text, "Delivery delivery delivery schedule applies.");
}

#[test]
fn all_stop_words_fall_back_to_leading_sentences() {
    let text = "It is. We are. They were. You are.";
    assert_eq!(summarize(text, 2), "It is. We are.");
}

#[test]
fn numbers_do_not_score() {
    let text = "12 34 56. Scope of work. 78 90.";
    assert_eq!(summarize(text, 1), "Scope of work.");
}

#[test]
fn weights_are_normalized_to_max() {
    let w = word_weights(&["Tender tender bid.", "The bid."]);
    assert_eq!(w.get("tender"), Some(&1.0));
    assert_eq!(w.get("bid"), Some(&1.0));
    assert!(w.get("the").is_none());
}

#[test]
fn non_alphabetic_tokens_are_ignored() {
    let w = word_weights(&["Clause 12 item-rates 2024."]);
    assert!(w.contains_key("clause"));
    assert!(!w.contains_key("12"));
    assert!(!w.contains_key("item-rates"));
}

#[test]
fn stop_words_score_zero() {
    let w = word_weights(&["the and of"]);
    assert!(w.is_empty());
    assert_eq!(score_sentence("the and of", &w), 0.0);
}

#[test]
fn ties_prefer_earlier_sentences() {
    let picked = select_indices(&["alpha.", "beta.", "gamma."], 2);
    assert_eq!(picked, vec![0, 1]);
}

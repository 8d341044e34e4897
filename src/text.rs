use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("static sentence break regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

/// Collapses every whitespace run (newlines included) to one space and trims.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits on `.`, `!` or `?` followed by whitespace. The punctuation stays with
/// the sentence it ends. Abbreviations such as "Fig. 2" are split too.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let text = normalize(text);
    let mut out = Vec::new();
    let mut start = 0usize;

    for m in SENTENCE_BREAK.find_iter(&text) {
        // punctuation is a single ASCII byte
        push_sentence(&mut out, &text[start..m.start() + 1]);
        start = m.end();
    }
    push_sentence(&mut out, &text[start..]);
    out
}

fn push_sentence(out: &mut Vec<Sentence>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push(Sentence {
        index: out.len(),
        text: trimmed.to_string(),
    });
}

pub fn sentence_texts(sentences: &[Sentence]) -> Vec<&str> {
    sentences.iter().map(|s| s.text.as_str()).collect()
}

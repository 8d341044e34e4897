use crate::text::{normalize, split_sentences};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// English function words (NLTK's list).
static STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_SET.contains(word)
}

/// Lowercased word tokens. Punctuation separates tokens; apostrophes and
/// hyphens stay inside a token, so "item-rates" is one (non-alphabetic) token.
fn tokens(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Word weights in [0,1]: alphabetic non-stop-word counts divided by the max count.
pub fn word_weights<S: AsRef<str>>(sentences: &[S]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for s in sentences {
        for tok in tokens(s.as_ref()) {
            if tok.chars().all(char::is_alphabetic) && !is_stop_word(&tok) {
                *counts.entry(tok).or_insert(0) += 1;
            }
        }
    }

    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return HashMap::new();
    }
    counts
        .into_iter()
        .map(|(w, c)| (w, f64::from(c) / f64::from(max)))
        .collect()
}

pub fn score_sentence(sentence: &str, weights: &HashMap<String, f64>) -> f64 {
    tokens(sentence)
        .map(|t| weights.get(&t).copied().unwrap_or(0.0))
        .sum()
}

/// Indices of the `max_sentences` best-scoring sentences, returned in
/// document order. Ties go to the earlier sentence.
pub fn select_indices<S: AsRef<str>>(sentences: &[S], max_sentences: usize) -> Vec<usize> {
    let weights = word_weights(sentences);
    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, score_sentence(s.as_ref(), &weights)))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut picked: Vec<usize> = ranked
        .into_iter()
        .take(max_sentences)
        .map(|(i, _)| i)
        .collect();
    picked.sort_unstable();
    picked
}

/// Frequency-ranked extractive summary of `text`, at most `max_sentences`
/// sentences, joined by single spaces in original order.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return String::new();
    }

    let sentences: Vec<String> = split_sentences(&normalized)
        .into_iter()
        .map(|s| s.text)
        .collect();

    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    select_indices(&sentences, max_sentences)
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

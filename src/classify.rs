use crate::{error::ConfigError, summarize::summarize, text::Sentence};
use regex::{Regex, RegexBuilder};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use tracing::{debug, warn};

pub const DEFAULT_SECTION_SUMMARY_SENTENCES: usize = 4;

const SECTION_TITLES: &[(&str, &str)] = &[
    ("technical_specifications", "Technical Specifications"),
    ("certificates", "Certificates"),
    ("atc_documents", "ATC Documents"),
    ("boq", "Bill of Quantities"),
    ("eligibility", "Eligibility Criteria"),
    ("important_dates", "Important Dates"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionRule {
    pub key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_min_confidence() -> f64 {
    0.2
}

impl SectionRule {
    pub fn new(key: &str, keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            enabled: true,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            min_confidence: default_min_confidence(),
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}

/// The six procurement sections and their stock keyword sets.
pub fn default_rules() -> Vec<SectionRule> {
    vec![
        SectionRule::new(
            "technical_specifications",
            &["specification", "technical", "compliance"],
        ),
        SectionRule::new("certificates", &["certificate", "certification", "iso"]),
        SectionRule::new("atc_documents", &["ATC", "terms", "conditions", "amendment"]),
        SectionRule::new("boq", &["bill of quantity", "boq", "pricing", "rate"]),
        SectionRule::new("eligibility", &["eligibility", "experience", "turnover"]),
        SectionRule::new("important_dates", &["bid end", "submission", "opening"]),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionInsight {
    pub title: String,
    pub summary: String,
    pub importance_score: f64,
    pub keywords_found: Vec<String>,
}

/// Section-keyed values in rule order. Serializes as a JSON object whose keys
/// keep that order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMap<V>(Vec<(String, V)>);

impl<V> Default for SectionMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> SectionMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an existing key in place, otherwise appends.
    pub fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl<V> Index<&str> for SectionMap<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("no section {key:?}"),
        }
    }
}

impl<V> FromIterator<(String, V)> for SectionMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'a, V> IntoIterator for &'a SectionMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, (String, V)>, fn(&'a (String, V)) -> (&'a String, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        let pair: fn(&'a (String, V)) -> (&'a String, &'a V) = |(k, v)| (k, v);
        self.0.iter().map(pair)
    }
}

impl<V: Serialize> Serialize for SectionMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for SectionMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
            type Value = SectionMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by section")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = SectionMap::new();
                while let Some((k, v)) = access.next_entry::<String, V>()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

#[derive(Debug, Clone)]
pub struct SectionMatch<'a> {
    pub key: &'a str,
    pub matched_sentences: Vec<&'a Sentence>,
    pub keywords_found: Vec<String>,
}

struct KeywordMatcher {
    keyword: String,
    re: Regex,
}

/// A rule with its keyword matchers built once, reused for every sentence.
pub struct CompiledRule {
    key: String,
    enabled: bool,
    min_confidence: f64,
    matchers: Vec<KeywordMatcher>,
}

impl CompiledRule {
    pub fn compile(rule: &SectionRule) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut matchers = Vec::new();
        for kw in &rule.keywords {
            let kw = kw.trim();
            if kw.is_empty() {
                warn!("section {}: ignoring blank keyword", rule.key);
                continue;
            }
            if !seen.insert(kw.to_lowercase()) {
                continue;
            }
            let re = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(kw)))
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidKeyword {
                    section: rule.key.clone(),
                    keyword: kw.to_string(),
                    source,
                })?;
            matchers.push(KeywordMatcher {
                keyword: kw.to_string(),
                re,
            });
        }

        let min_confidence = if rule.min_confidence.is_nan() {
            0.0
        } else {
            rule.min_confidence.clamp(0.0, 1.0)
        };

        Ok(Self {
            key: rule.key.clone(),
            enabled: rule.enabled,
            min_confidence,
            matchers,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn keyword_count(&self) -> usize {
        self.matchers.len()
    }

    pub fn match_sentences<'a>(&'a self, sentences: &'a [Sentence]) -> SectionMatch<'a> {
        let mut matched_sentences = Vec::new();
        let mut found: Vec<String> = Vec::new();

        for s in sentences {
            let hits: Vec<&str> = self
                .matchers
                .iter()
                .filter(|m| m.re.is_match(&s.text))
                .map(|m| m.keyword.as_str())
                .collect();
            if hits.is_empty() {
                continue;
            }
            matched_sentences.push(s);
            found.extend(hits.into_iter().map(str::to_string));
        }

        SectionMatch {
            key: &self.key,
            matched_sentences,
            keywords_found: dedup_sorted_ci(found),
        }
    }
}

fn dedup_sorted_ci(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = words
        .into_iter()
        .filter(|w| seen.insert(w.to_lowercase()))
        .collect();
    out.sort_by_cached_key(|w| w.to_lowercase());
    out
}

/// Confidence and importance of a non-empty match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionScore {
    pub keyword_coverage: f64,
    pub sentence_ratio: f64,
    pub confidence: f64,
    pub importance: f64,
}

pub fn score(
    keyword_count: usize,
    keywords_found: usize,
    matched_sentences: usize,
    total_sentences: usize,
) -> SectionScore {
    let keyword_coverage = if keyword_count > 0 {
        keywords_found as f64 / keyword_count as f64
    } else {
        0.0
    };
    let sentence_ratio = matched_sentences as f64 / total_sentences.max(1) as f64;
    let confidence = if keyword_count > 0 {
        keyword_coverage
    } else {
        sentence_ratio
    };
    let importance = round3(sentence_ratio.max(confidence).min(1.0));
    SectionScore {
        keyword_coverage,
        sentence_ratio,
        confidence,
        importance,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

pub fn section_title(key: &str) -> String {
    if let Some((_, title)) = SECTION_TITLES.iter().find(|(k, _)| *k == key) {
        return title.to_string();
    }
    key.split('_')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Rule set compiled once per document run.
pub struct Classifier {
    rules: Vec<CompiledRule>,
    summary_sentences: usize,
}

impl Classifier {
    pub fn new(rules: &[SectionRule]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules,
            summary_sentences: DEFAULT_SECTION_SUMMARY_SENTENCES,
        })
    }

    pub fn with_summary_sentences(mut self, n: usize) -> Self {
        self.summary_sentences = n;
        self
    }

    /// Evaluates every enabled rule independently; a sentence can feed several
    /// sections. Output follows rule order.
    pub fn classify(&self, sentences: &[Sentence]) -> SectionMap<SectionInsight> {
        let mut out = SectionMap::new();
        if sentences.is_empty() {
            return out;
        }

        for rule in &self.rules {
            if !rule.enabled {
                debug!("section {} disabled", rule.key);
                continue;
            }

            let m = rule.match_sentences(sentences);
            if m.matched_sentences.is_empty() {
                debug!("section {} has no matching sentences", rule.key);
                continue;
            }

            let s = score(
                rule.keyword_count(),
                m.keywords_found.len(),
                m.matched_sentences.len(),
                sentences.len(),
            );
            if s.confidence < rule.min_confidence {
                debug!(
                    "section {} rejected confidence={:.3} min={:.3}",
                    rule.key, s.confidence, rule.min_confidence
                );
                continue;
            }

            let joined = m
                .matched_sentences
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            debug!(
                "section {} matched={} keywords={:?} importance={}",
                rule.key,
                m.matched_sentences.len(),
                m.keywords_found,
                s.importance
            );

            out.insert(
                rule.key.clone(),
                SectionInsight {
                    title: section_title(&rule.key),
                    summary: summarize(&joined, self.summary_sentences),
                    importance_score: s.importance,
                    keywords_found: m.keywords_found,
                },
            );
        }
        out
    }
}

/// One-shot form of [`Classifier::classify`].
pub fn classify(
    sentences: &[Sentence],
    rules: &[SectionRule],
) -> Result<SectionMap<SectionInsight>, ConfigError> {
    Ok(Classifier::new(rules)?.classify(sentences))
}

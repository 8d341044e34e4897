use crate::{
    chunk_plan::chunk,
    classify::{Classifier, SectionInsight, SectionMap},
    config::{ChunkSettings, Config},
    error::{ConfigError, ProviderError, ProviderFailure},
    languages::{self, Language},
    provider::TranslationProvider,
    source::{SourceDocument, SourcePage},
    summarize::summarize,
    text::{normalize, split_sentences},
    translation::{TranslatedPage, TranslationLanguageResult, TranslationOutcome, aggregate},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const NO_INSIGHT: &str = "No insight detected.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub summary: String,
    pub highlights: SectionMap<String>,
    pub sections: SectionMap<SectionInsight>,
}

/// Document summary plus per-section insights for the whole document.
pub fn analyze(cfg: &Config, doc: &SourceDocument) -> Result<DocumentAnalysis, ConfigError> {
    let started = Instant::now();
    let classifier = Classifier::new(&cfg.rules)?
        .with_summary_sentences(cfg.analysis.section_summary_sentences);

    let full_text = normalize(&doc.full_text());
    let sentences = split_sentences(&full_text);
    let summary = summarize(&full_text, cfg.analysis.summary_sentences);
    let sections = classifier.classify(&sentences);
    let highlights = build_highlights(&sections, cfg.analysis.highlight_max_chars);

    info!(
        "analyzed {} pages={} sentences={} sections={} elapsed_ms={}",
        doc.name,
        doc.pages.len(),
        sentences.len(),
        sections.len(),
        started.elapsed().as_millis()
    );

    Ok(DocumentAnalysis {
        summary,
        highlights,
        sections,
    })
}

/// First sentence-ish fragment of each section summary, capped at `max_chars`.
pub fn build_highlights(
    sections: &SectionMap<SectionInsight>,
    max_chars: usize,
) -> SectionMap<String> {
    sections
        .iter()
        .map(|(key, s)| {
            let highlight = if s.summary.is_empty() {
                NO_INSIGHT.to_string()
            } else {
                let head = s.summary.split('.').next().unwrap_or_default();
                head.chars().take(max_chars).collect()
            };
            (key.clone(), highlight)
        })
        .collect()
}

pub struct Translator<P: TranslationProvider> {
    provider: P,
    chunking: ChunkSettings,
    skip_blank_pages: bool,
}

impl<P: TranslationProvider> Translator<P> {
    pub fn new(cfg: &Config, provider: P) -> Self {
        Self {
            provider,
            chunking: cfg.translation.effective_chunking(),
            skip_blank_pages: cfg.translation.skip_blank_pages,
        }
    }

    pub fn chunking(&self) -> ChunkSettings {
        self.chunking
    }

    /// Validates every code before any provider call, then translates each
    /// distinct language in turn. A provider failure drops only that language.
    pub fn translate(
        &self,
        doc: &SourceDocument,
        language_codes: &[String],
    ) -> Result<TranslationOutcome, ConfigError> {
        let mut targets = languages::resolve_all(language_codes)?;
        let mut seen = HashSet::new();
        targets.retain(|l| seen.insert(l.code));
        let mut outcome = TranslationOutcome::default();
        if targets.is_empty() {
            return Ok(outcome);
        }

        let pages: Vec<&SourcePage> = doc
            .pages
            .iter()
            .filter(|p| !(self.skip_blank_pages && p.text.trim().is_empty()))
            .collect();
        if pages.len() < doc.pages.len() {
            debug!("skipping {} blank pages", doc.pages.len() - pages.len());
        }

        info!(
            "translating {} pages={} languages={} chunk_size={} overlap={}",
            doc.name,
            pages.len(),
            targets.len(),
            self.chunking.chunk_size,
            self.chunking.overlap
        );

        for lang in targets {
            let started = Instant::now();
            match self.translate_language(&pages, lang) {
                Ok(result) => {
                    info!(
                        "language {} done pages={} words={} elapsed_ms={}",
                        lang.code,
                        result.pages.len(),
                        result.word_count(),
                        started.elapsed().as_millis()
                    );
                    outcome.results.push(result);
                }
                Err(source) => {
                    warn!("language {} failed: {}", lang.code, source);
                    outcome.failures.push(ProviderFailure {
                        language_code: lang.code.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(outcome)
    }

    fn translate_language(
        &self,
        pages: &[&SourcePage],
        lang: Language,
    ) -> Result<TranslationLanguageResult, ProviderError> {
        let mut translated: Vec<TranslatedPage> = Vec::with_capacity(pages.len());

        for page in pages {
            let original = page.text.trim();
            let segments: Vec<String> = chunk(original, self.chunking.chunk_size, self.chunking.overlap)
                .into_iter()
                .map(|c| c.text)
                .collect();

            let outputs = if segments.is_empty() {
                Vec::new()
            } else {
                debug!(
                    "page {} -> {} segments for {}",
                    page.page_number,
                    segments.len(),
                    lang.code
                );
                let out = self.provider.translate(&segments, lang.code)?;
                if out.len() != segments.len() {
                    return Err(ProviderError::LengthMismatch {
                        expected: segments.len(),
                        actual: out.len(),
                    });
                }
                out
            };

            translated.push(aggregate(page.page_number, original, &outputs));
        }

        Ok(TranslationLanguageResult {
            language_code: lang.code.to_string(),
            language_name: lang.name.to_string(),
            pages: translated,
        })
    }
}

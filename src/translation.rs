use crate::error::ProviderFailure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedPage {
    pub page_number: u32,
    pub original_text: String,
    pub translated_text: String,
}

/// Joins translated chunk outputs with single spaces. A page with no chunks
/// is kept with empty text so page positions stay aligned with the source.
pub fn aggregate<S: AsRef<str>>(
    page_number: u32,
    original_text: &str,
    translated_chunks: &[S],
) -> TranslatedPage {
    let joined = translated_chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    TranslatedPage {
        page_number,
        original_text: original_text.to_string(),
        translated_text: joined.trim().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationLanguageResult {
    pub language_code: String,
    pub language_name: String,
    pub pages: Vec<TranslatedPage>,
}

impl TranslationLanguageResult {
    fn translated(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .map(|p| p.translated_text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Non-empty page translations separated by blank lines.
    pub fn full_text(&self) -> String {
        self.translated().collect::<Vec<_>>().join("\n\n")
    }

    pub fn word_count(&self) -> usize {
        self.translated().map(|t| t.split_whitespace().count()).sum()
    }

    /// Counted in chars, not bytes.
    pub fn character_count(&self) -> usize {
        self.translated().map(|t| t.chars().count()).sum()
    }

    pub fn stats(&self) -> LanguageStats {
        LanguageStats {
            language_code: self.language_code.clone(),
            language_name: self.language_name.clone(),
            pages: self.pages.len(),
            word_count: self.word_count(),
            character_count: self.character_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language_code: String,
    pub language_name: String,
    pub pages: usize,
    pub word_count: usize,
    pub character_count: usize,
}

/// Per-language successes and failures of one translation request.
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    pub results: Vec<TranslationLanguageResult>,
    pub failures: Vec<ProviderFailure>,
}

impl TranslationOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn result_for(&self, code: &str) -> Option<&TranslationLanguageResult> {
        self.results.iter().find(|r| r.language_code == code)
    }

    pub fn failure_for(&self, code: &str) -> Option<&ProviderFailure> {
        self.failures.iter().find(|f| f.language_code == code)
    }
}

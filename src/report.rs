use crate::{
    classify::{SectionRule, section_title},
    pipeline::DocumentAnalysis,
    translation::{LanguageStats, TranslationLanguageResult, TranslationOutcome},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub document_name: String,
    pub generated_at: String,
    pub page_count: usize,
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
    pub rules: Vec<SectionRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationManifest {
    pub document_name: String,
    pub generated_at: String,
    pub translations: Vec<ManifestEntry>,
    pub failures: Vec<FailureEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub stats: LanguageStats,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    pub language_code: String,
    pub error: String,
}

pub fn render_analysis_markdown(report: &AnalysisReport) -> String {
    let a = &report.analysis;
    let mut lines = vec![
        format!("# Bid Summary - {}", report.document_name),
        String::new(),
        format!("Generated at: {}", report.generated_at),
        String::new(),
        "## Executive Summary".to_string(),
        a.summary.clone(),
        String::new(),
        "## Highlights".to_string(),
    ];

    if a.highlights.is_empty() {
        lines.push("- No highlights identified.".to_string());
    } else {
        for (key, value) in &a.highlights {
            lines.push(format!("- **{}**: {}", section_title(key), value));
        }
    }

    for section in a.sections.values() {
        let keywords = if section.keywords_found.is_empty() {
            "None".to_string()
        } else {
            section.keywords_found.join(", ")
        };
        let summary = if section.summary.is_empty() {
            "No content detected."
        } else {
            section.summary.as_str()
        };
        lines.extend([
            String::new(),
            format!("## {}", section.title),
            summary.to_string(),
            String::new(),
            format!("**Importance score:** {}", section.importance_score),
            format!("**Keywords found:** {keywords}"),
        ]);
    }

    lines.join("\n")
}

pub fn translation_filename(document_name: &str, language_code: &str) -> String {
    format!("{}_{}.md", file_stem(document_name), language_code)
}

pub fn render_translation_markdown(
    document_name: &str,
    translation: &TranslationLanguageResult,
) -> String {
    let mut lines = vec![
        format!("# Translation - {document_name}"),
        format!(
            "Language: {} ({})",
            translation.language_name, translation.language_code
        ),
        String::new(),
    ];
    for page in &translation.pages {
        let body = if page.translated_text.is_empty() {
            "_No translatable text extracted for this page._"
        } else {
            page.translated_text.as_str()
        };
        lines.extend([
            format!("## Page {}", page.page_number),
            body.to_string(),
            String::new(),
        ]);
    }
    lines.join("\n")
}

pub fn build_manifest(
    document_name: &str,
    generated_at: &str,
    outcome: &TranslationOutcome,
) -> TranslationManifest {
    TranslationManifest {
        document_name: document_name.to_string(),
        generated_at: generated_at.to_string(),
        translations: outcome
            .results
            .iter()
            .map(|r| ManifestEntry {
                stats: r.stats(),
                filename: translation_filename(document_name, &r.language_code),
            })
            .collect(),
        failures: outcome
            .failures
            .iter()
            .map(|f| FailureEntry {
                language_code: f.language_code.clone(),
                error: f.source.to_string(),
            })
            .collect(),
    }
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

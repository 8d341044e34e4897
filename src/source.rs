use crate::{config::Config, error::SourceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePage {
    pub page_number: u32, // 1-based
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub name: String,
    pub pages: Vec<SourcePage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    text: String,
}

impl SourceDocument {
    /// Numbers pages 1..=n in the given order.
    pub fn from_texts<S: Into<String>>(name: &str, texts: impl IntoIterator<Item = S>) -> Self {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| SourcePage {
                page_number: i as u32 + 1,
                text: t.into(),
            })
            .collect();
        Self {
            name: name.to_string(),
            pages,
        }
    }

    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn blank_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.text.trim().is_empty()).count()
    }

    /// Loads `.json` (array of `{page_number?, text}`, numbers must equal the
    /// 1-based position) or plain text split on `source.page_separator`.
    /// Blank pages are kept.
    pub fn load(cfg: &Config, input: &Path) -> Result<Self, SourceError> {
        validate_input(cfg, input)?;

        let raw = std::fs::read_to_string(input).map_err(|source| SourceError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        let is_json = input
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let mut pages = if is_json {
            parse_json_pages(input, &raw)?
        } else {
            split_text_pages(&raw, &cfg.source.page_separator)
        };

        if cfg.source.normalize_unicode {
            for p in &mut pages {
                p.text = p.text.nfkc().collect();
            }
        }

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        let doc = Self { name, pages };
        debug!(
            "loaded {} pages={} blank={}",
            input.display(),
            doc.pages.len(),
            doc.blank_pages()
        );
        Ok(doc)
    }
}

fn parse_json_pages(path: &Path, raw: &str) -> Result<Vec<SourcePage>, SourceError> {
    let raw_pages: Vec<RawPage> = serde_json::from_str(raw).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pages = Vec::with_capacity(raw_pages.len());
    for (i, rp) in raw_pages.into_iter().enumerate() {
        let expected = i as u32 + 1;
        if let Some(got) = rp.page_number.filter(|n| *n != expected) {
            return Err(SourceError::PageNumber { expected, got });
        }
        pages.push(SourcePage {
            page_number: expected,
            text: rp.text,
        });
    }
    Ok(pages)
}

pub fn split_text_pages(raw: &str, separator: &str) -> Vec<SourcePage> {
    let raw = raw.replace("\r\n", "\n");
    let mut parts: Vec<&str> = if separator.is_empty() {
        vec![raw.as_str()]
    } else {
        raw.split(separator).collect()
    };
    // pdftotext ends the last page with a separator too
    if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts
        .into_iter()
        .enumerate()
        .map(|(i, t)| SourcePage {
            page_number: i as u32 + 1,
            text: t.to_string(),
        })
        .collect()
}

pub fn validate_input(cfg: &Config, input: &Path) -> Result<(), SourceError> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(SourceError::UrlInput(input_str));
    }

    let meta = std::fs::metadata(input).map_err(|_| SourceError::Missing(PathBuf::from(input)))?;

    if cfg.source.max_input_bytes > 0 && meta.len() > cfg.source.max_input_bytes {
        return Err(SourceError::TooLarge {
            path: input.to_path_buf(),
            size: meta.len(),
            limit: cfg.source.max_input_bytes,
        });
    }

    match input.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("txt") => {}
        Some(ext) => warn!("unexpected extension .{ext}; reading as plain text: {input_str}"),
        None => warn!("input has no extension; reading as plain text: {input_str}"),
    }

    Ok(())
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}

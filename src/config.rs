use crate::{
    chunk_plan::MIN_CHUNK_SIZE,
    classify::{SectionRule, default_rules},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default = "default_rules")]
    pub rules: Vec<SectionRule>,
    #[serde(default)]
    pub translation: Translation,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// A stable, normalization-friendly string for hashing.
    pub fn normalized_for_hash(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: Default::default(),
            paths: Default::default(),
            source: Default::default(),
            analysis: Default::default(),
            rules: default_rules(),
            translation: Default::default(),
            output: Default::default(),
            logging: Default::default(),
            security: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub job_name: String,
    pub resume: bool,
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            job_name: "default".into(),
            resume: true,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub out_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub normalize_unicode: bool,
    pub page_separator: String,
    pub max_input_bytes: u64,
}
impl Default for Source {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            page_separator: "\u{000C}".into(),
            max_input_bytes: 256 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub summary_sentences: usize,
    pub section_summary_sentences: usize,
    pub highlight_max_chars: usize,
}
impl Default for Analysis {
    fn default() -> Self {
        Self {
            summary_sentences: 8,
            section_summary_sentences: 4,
            highlight_max_chars: 240,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub provider: String,
    pub command: String,
    pub args: Vec<String>,
    pub timeout_seconds: u64,
    pub env: std::collections::BTreeMap<String, String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub skip_blank_pages: bool,
    pub languages: Vec<String>,
}
impl Default for Translation {
    fn default() -> Self {
        Self {
            provider: "command".into(),
            command: "".into(),
            args: Vec::new(),
            timeout_seconds: 120,
            env: Default::default(),
            chunk_size: 3500,
            chunk_overlap: 200,
            skip_blank_pages: false,
            languages: Vec::new(),
        }
    }
}

impl Translation {
    pub fn effective_chunking(&self) -> ChunkSettings {
        ChunkSettings::effective(self.chunk_size, self.chunk_overlap)
    }
}

/// Chunk sizing after the provider floor and overlap clamp are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSettings {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl ChunkSettings {
    pub fn effective(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size / 2),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub write_report_json: bool,
    pub write_report_markdown: bool,
    pub write_translations: bool,
    pub write_index_json: bool,
    pub report_filename: String,
    pub markdown_filename: String,
    pub manifest_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            write_report_json: true,
            write_report_markdown: true,
            write_translations: true,
            write_index_json: true,
            report_filename: "report.json".into(),
            markdown_filename: "report.md".into(),
            manifest_filename: "manifest.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Security {
    pub reject_url_inputs: bool,
}
impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
        }
    }
}

use crate::{config::ChunkSettings, source::SourcePage, text::normalize};
use serde::{Deserialize, Serialize};

pub const MIN_CHUNK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub start_offset: usize, // char offset into the page's normalized text
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePlan {
    pub page_number: u32,
    pub normalized_chars: usize,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPlan {
    pub chunk_size: usize,
    pub overlap: usize,
    pub pages: Vec<PagePlan>,
}

impl ChunkPlan {
    pub fn from_pages(settings: ChunkSettings, pages: &[SourcePage]) -> ChunkPlan {
        let pages = pages
            .iter()
            .map(|p| PagePlan {
                page_number: p.page_number,
                normalized_chars: normalize(&p.text).chars().count(),
                chunks: chunk(&p.text, settings.chunk_size, settings.overlap),
            })
            .collect();
        ChunkPlan {
            chunk_size: settings.chunk_size,
            overlap: settings.overlap,
            pages,
        }
    }

    pub fn total_chunks(&self) -> usize {
        self.pages.iter().map(|p| p.chunks.len()).sum()
    }
}

/// Splits the normalized `text` into windows of `chunk_size` chars, each
/// starting `overlap` chars before the previous window's end.
///
/// Expects `chunk_size >= 1` and `overlap <= chunk_size / 2`; see
/// [`ChunkSettings::effective`] for the clamping applied by callers.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size / 2);

    // byte index of every char, plus the end
    let bounds: Vec<usize> = normalized
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(normalized.len()))
        .collect();
    let length = bounds.len() - 1;

    if length <= chunk_size {
        return vec![Chunk {
            text: normalized,
            start_offset: 0,
        }];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < length {
        let end = (start + chunk_size).min(length);
        let window = &normalized[bounds[start]..bounds[end]];
        let trimmed = window.trim_start();
        let lead = window.chars().count() - trimmed.chars().count();
        let trimmed = trimmed.trim_end();
        if !trimmed.is_empty() {
            chunks.push(Chunk {
                text: trimmed.to_string(),
                start_offset: start + lead,
            });
        }
        if end >= length {
            break;
        }
        start = end.saturating_sub(overlap);
    }
    chunks
}

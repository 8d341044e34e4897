pub mod chunk_plan;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod languages;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod source;
pub mod summarize;
pub mod text;
pub mod translation;
pub mod util;

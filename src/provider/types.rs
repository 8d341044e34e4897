use serde::{Deserialize, Serialize};

/// Request written to the provider command's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateIn {
    pub target: String,
    pub segments: Vec<String>,
}

/// Response read from the provider command's stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateOut {
    pub ok: bool,
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

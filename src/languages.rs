use crate::error::ConfigError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "ar", name: "Arabic" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "de", name: "German" },
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "it", name: "Italian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "pl", name: "Polish" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "th", name: "Thai" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "uk", name: "Ukrainian" },
    Language { code: "ur", name: "Urdu" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "zh", name: "Chinese (Simplified)" },
];

pub fn lookup(code: &str) -> Option<Language> {
    let code = code.trim().to_ascii_lowercase();
    SUPPORTED_LANGUAGES.iter().copied().find(|l| l.code == code)
}

/// Resolves every code, failing on the first unsupported one.
pub fn resolve_all<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Language>, ConfigError> {
    codes
        .iter()
        .map(|c| {
            lookup(c.as_ref()).ok_or_else(|| ConfigError::UnsupportedLanguage {
                code: c.as_ref().to_string(),
            })
        })
        .collect()
}

/// Parses "fr, DE,,fr" into ["fr", "de"].
pub fn parse_language_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in raw.split(',') {
        let code = code.trim().to_ascii_lowercase();
        if !code.is_empty() && !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

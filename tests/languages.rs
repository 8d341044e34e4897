use bid_insight::{
    error::ConfigError,
    languages::{SUPPORTED_LANGUAGES, lookup, parse_language_list, resolve_all},
};

#[test]
fn lookup_is_case_insensitive() {
    assert_eq!(lookup("FR").map(|l| l.name), Some("French"));
    assert!(lookup("xx").is_none());
}

#[test]
fn parse_list_dedups_in_order() {
    assert_eq!(parse_language_list("fr, DE,,fr "), vec!["fr", "de"]);
    assert!(parse_language_list(" , ").is_empty());
}

#[test]
fn resolve_all_reports_bad_code() {
    let err = resolve_all(&["fr", "xx"]).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedLanguage { code } if code == "xx"));
}

#[test]
fn table_codes_are_unique_lowercase() {
    let mut codes: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
    assert!(codes.iter().all(|c| *c == c.to_lowercase()));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), SUPPORTED_LANGUAGES.len());
}

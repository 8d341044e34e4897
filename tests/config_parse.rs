use bid_insight::{
    classify::default_rules,
    config::{ChunkSettings, Config},
    error::ConfigError,
    provider,
};

#[test]
fn parse_example_config() {
    let raw = include_str!("../bid-insight.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert!(!cfg.paths.out_dir.is_empty());
    assert_eq!(cfg.rules, default_rules());
    assert_eq!(cfg.translation.env["LIBRETRANSLATE_URL"], "https://libretranslate.de");
    assert_eq!(cfg.source.page_separator, "\u{000C}");
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let cfg: Config = toml::from_str(
        r#"
        [translation]
        provider = "identity"
        chunk_size = 120
        "#,
    )
    .expect("parse TOML");
    assert_eq!(cfg.rules.len(), 6);
    assert_eq!(cfg.analysis.summary_sentences, 8);
    assert_eq!(cfg.translation.chunk_overlap, 200);
    assert_eq!(
        cfg.translation.effective_chunking(),
        ChunkSettings {
            chunk_size: 500,
            overlap: 200
        }
    );
}

#[test]
fn custom_rules_replace_the_defaults() {
    let cfg: Config = toml::from_str(
        r#"
        [[rules]]
        key = "warranty"
        keywords = ["warranty", "guarantee"]
        "#,
    )
    .expect("parse TOML");
    assert_eq!(cfg.rules.len(), 1);
    assert!(cfg.rules[0].enabled);
    assert_eq!(cfg.rules[0].min_confidence, 0.2);
}

#[test]
fn unknown_provider_is_rejected() {
    let mut cfg = Config::default();
    cfg.translation.provider = "deepl".into();
    assert!(matches!(
        provider::from_config(&cfg.translation),
        Err(ConfigError::UnsupportedProvider { .. })
    ));

    cfg.translation.provider = "command".into();
    assert!(matches!(
        provider::from_config(&cfg.translation),
        Err(ConfigError::MissingProviderCommand)
    ));
}

#[test]
fn config_hash_is_stable() {
    let a = Config::default().normalized_for_hash();
    let b = Config::default().normalized_for_hash();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

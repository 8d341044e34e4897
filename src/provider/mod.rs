pub mod command;
pub mod types;

use crate::{config::Translation, error::ConfigError, error::ProviderError};
use tracing::info;

pub use command::CommandProvider;
pub use types::{TranslateIn, TranslateOut};

/// Translates an ordered batch of segments into one target language.
///
/// Implementations should return one output per input, in order; callers
/// verify the length and treat a mismatch as a failure.
pub trait TranslationProvider {
    fn name(&self) -> &str;
    fn translate(&self, segments: &[String], target_language: &str)
        -> Result<Vec<String>, ProviderError>;
}

impl<P: TranslationProvider + ?Sized> TranslationProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(
        &self,
        segments: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        (**self).translate(segments, target_language)
    }
}

impl<P: TranslationProvider + ?Sized> TranslationProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(
        &self,
        segments: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        (**self).translate(segments, target_language)
    }
}

/// Returns segments unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityProvider;

impl TranslationProvider for IdentityProvider {
    fn name(&self) -> &str {
        "identity"
    }

    fn translate(&self, segments: &[String], _target: &str) -> Result<Vec<String>, ProviderError> {
        Ok(segments.to_vec())
    }
}

pub fn from_config(cfg: &Translation) -> Result<Box<dyn TranslationProvider>, ConfigError> {
    let provider: Box<dyn TranslationProvider> = match cfg.provider.to_ascii_lowercase().as_str() {
        "identity" => Box::new(IdentityProvider),
        "command" => Box::new(CommandProvider::new(cfg)?),
        other => {
            return Err(ConfigError::UnsupportedProvider {
                name: other.to_string(),
            });
        }
    };
    info!("translation provider={}", provider.name());
    Ok(provider)
}

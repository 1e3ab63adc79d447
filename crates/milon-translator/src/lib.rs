use std::sync::Arc;

use milon_types::TranslationResult;

pub mod inference;

pub use inference::{Inference, InferenceEngine, MarkupRules, Rule, RuleMatch};

/// Shown for every lookup failure, transport and miss alike
pub const TRANSLATION_FAILED: &str = "Translation failed. Please enter the translation manually.";

/// Remote dictionary returning raw markup for a headword
#[async_trait::async_trait]
pub trait MarkupSource: Send + Sync {
    /// Fetch the markup page for exactly this word
    async fn fetch_markup(&self, word: &str) -> Result<String, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Lookup miss: {0}")]
    LookupMiss(String),

    #[error("No markup payload for this word")]
    MissingPayload,
}

impl TranslateError {
    pub fn user_message(&self) -> &'static str {
        TRANSLATION_FAILED
    }

    /// The remote answered but had nothing usable
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, TranslateError::LookupMiss(_) | TranslateError::MissingPayload)
    }
}

/// Fetch followed by inference
#[derive(Clone)]
pub struct Lookup {
    source: Arc<dyn MarkupSource>,
    engine: Arc<InferenceEngine>,
}

impl Lookup {
    pub fn new(source: Arc<dyn MarkupSource>, engine: Arc<InferenceEngine>) -> Self {
        Self { source, engine }
    }

    pub async fn translate(&self, word: &str) -> Result<TranslationResult, TranslateError> {
        tracing::info!("Attempting to translate word: \"{}\"", word);

        let markup = self.source.fetch_markup(word).await.map_err(|e| {
            let provider = self.source.metadata().name;
            if e.is_lookup_miss() {
                tracing::info!(%provider, "No dictionary entry: {}", e);
            } else {
                tracing::warn!(%provider, "Translation error: {}", e);
            }
            e
        })?;

        Ok(self.engine.infer(word, &markup))
    }

    pub fn metadata(&self) -> ProviderMetadata {
        self.source.metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milon_types::Gender;

    struct Canned(Option<&'static str>);

    #[async_trait::async_trait]
    impl MarkupSource for Canned {
        async fn fetch_markup(&self, _word: &str) -> Result<String, TranslateError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| TranslateError::LookupMiss("missingtitle".to_string()))
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "canned".to_string(),
                source_lang: "he".to_string(),
                target_lang: "en".to_string(),
            }
        }
    }

    fn engine() -> Arc<InferenceEngine> {
        Arc::new(InferenceEngine::new(MarkupRules::new("English", "translation-tag", "en")).unwrap())
    }

    #[tokio::test]
    async fn test_translate_runs_inference() {
        let lookup = Lookup::new(
            Arc::new(Canned(Some("masculine noun\n* English: hummus"))),
            engine(),
        );

        let result = lookup.translate("חומוס").await.unwrap();
        assert_eq!(result.gloss.as_deref(), Some("hummus"));
        assert_eq!(result.gender, Some(Gender::Masculine));
    }

    #[tokio::test]
    async fn test_miss_surfaces_as_error() {
        let lookup = Lookup::new(Arc::new(Canned(None)), engine());

        let err = lookup.translate("xx").await.unwrap_err();
        assert!(err.is_lookup_miss());
        assert_eq!(err.user_message(), TRANSLATION_FAILED);
    }
}

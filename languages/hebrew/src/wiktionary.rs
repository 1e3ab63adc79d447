use std::time::Duration;

use async_trait::async_trait;
use milon_translator::{MarkupSource, ProviderMetadata, TranslateError};
use serde::Deserialize;

#[derive(Clone)]
pub struct HebrewWiktionary {
    client: reqwest::Client,
    api_url: String,
}

impl HebrewWiktionary {
    pub fn with_timeout(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl MarkupSource for HebrewWiktionary {
    async fn fetch_markup(&self, word: &str) -> Result<String, TranslateError> {
        let params = [
            ("action", "parse"),
            ("page", word),
            ("prop", "wikitext"),
            ("format", "json"),
            ("origin", "*"),
        ];

        tracing::debug!("Fetching wikitext for {}", word);
        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Wiktionary returned {}", response.status());
            return Err(TranslateError::Api(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: ParseResponse = response.json().await.map_err(|e| {
            TranslateError::Api(format!("Failed to parse response: {}", e))
        })?;

        body.into_markup()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "he.wiktionary".to_string(),
            source_lang: "he".to_string(),
            target_lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    wikitext: Option<Wikitext>,
}

#[derive(Debug, Deserialize)]
struct Wikitext {
    #[serde(rename = "*")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    info: Option<String>,
}

impl ParseResponse {
    fn into_markup(self) -> Result<String, TranslateError> {
        if let Some(error) = self.error {
            let info = error
                .info
                .unwrap_or_else(|| "Word not found in Wiktionary".to_string());
            return Err(TranslateError::LookupMiss(info));
        }

        self.parse
            .and_then(|page| page.wikitext)
            .and_then(|text| text.content)
            .filter(|content| !content.is_empty())
            .ok_or(TranslateError::MissingPayload)
    }
}

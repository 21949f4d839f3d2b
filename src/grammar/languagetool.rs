use std::time::Duration;

use super::{match_range, AsyncGrammarService, GrammarError, GrammarRequest, GrammarResponse};

/// Client for a LanguageTool-compatible `/v2/check` endpoint.
pub struct LanguageToolClient {
    client: reqwest::Client,
    base_url: String,
}

impl LanguageToolClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GrammarError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GrammarError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/check", self.base_url.trim_end_matches('/'))
    }
}

impl AsyncGrammarService for LanguageToolClient {
    async fn check(&self, request: GrammarRequest) -> Result<GrammarResponse, GrammarError> {
        // LanguageTool wants BCP 47 tags: en_US -> en-US.
        let language = request.language.replace('_', "-");
        let response = self
            .client
            .post(self.endpoint())
            .form(&[("text", request.text.as_str()), ("language", language.as_str())])
            .send()
            .await
            .map_err(|e| GrammarError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GrammarError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut body: GrammarResponse = response
            .json()
            .await
            .map_err(|e| GrammarError::Decode(e.to_string()))?;

        // The server knows nothing about the caller's dictionary.
        body.matches.retain(|m| {
            match_range(&request.text, m)
                .map(|range| {
                    let word = request.text[range].to_lowercase();
                    !request.dictionary.iter().any(|known| *known == word)
                })
                .unwrap_or(true)
        });

        tracing::debug!(
            "LanguageTool returned {} matches for {:?}",
            body.matches.len(),
            request.text
        );
        Ok(body)
    }
}

//! "Tailor AI" stylist prompts and the [`StyleAdvisor`] seam.

use async_trait::async_trait;
use tracing::instrument;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, ThinkingConfig};

/// Persona and ground rules for the stylist.
pub const SYSTEM_INSTRUCTION: &str = "You are \"Tailor AI\", a master tailor and high-end fashion consultant for GIMCO KE, a bespoke menswear house in Nairobi, Kenya.

Your tone is sophisticated and professional, yet warm and helpful.

Guidance:
1. For style questions, recommend pieces from classic menswear rules while considering Kenyan trends such as Kitenge accents and business casual suited to Nairobi weather.
2. For fit questions, refer to the measurements given in the context.
3. Keep answers under 100 words unless a detailed explanation is requested.
4. For fabric questions, explain the benefits, e.g. wool for breathability or linen for Mombasa heat.

Never invent order numbers. Focus on style, fit and fabric advice.";

/// Build the user turn sent to the model.
#[must_use]
pub fn user_prompt(query: &str, measurements: &str) -> String {
    format!(
        "User Query: \"{query}\". \n\nContext: The user has the following measurements: {measurements}."
    )
}

/// Something that can answer a styling question.
#[async_trait]
pub trait StyleAdvisor: Send + Sync {
    /// Answer `query` for a customer with the given measurement summary.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::EmptyResponse` if the model produced no text,
    /// or any transport/API error.
    async fn advise(&self, query: &str, measurements: &str) -> Result<String, GeminiError>;
}

#[async_trait]
impl StyleAdvisor for GeminiClient {
    #[instrument(skip_all, fields(model = %self.chat_model()))]
    async fn advise(&self, query: &str, measurements: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(user_prompt(query, measurements))],
            system_instruction: Some(Content::instruction(SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
                max_output_tokens: None,
            }),
        };

        let response = self.generate_content(self.chat_model(), &request).await?;
        response.text().ok_or(GeminiError::EmptyResponse)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;
    use crate::config::GeminiConfig;

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig::new(SecretString::from("k")).with_base_url(server.base_url());
        GeminiClient::new(&config).unwrap()
    }

    #[test]
    fn test_user_prompt_embeds_query_and_measurements() {
        let prompt = user_prompt("What suits a wedding?", "Chest: 42, Waist: 34, Inseam: 32");
        assert_eq!(
            prompt,
            "User Query: \"What suits a wedding?\". \n\nContext: The user has the following measurements: Chest: 42, Waist: 34, Inseam: 32."
        );
    }

    #[tokio::test]
    async fn test_advise_sends_persona_and_disables_thinking() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.5-flash:generateContent")
                    .body_contains("Tailor AI")
                    .body_contains("\"thinkingBudget\":0");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "Try a charcoal linen blazer."}]}}]
                }));
            })
            .await;

        let reply = client_for(&server).advise("Linen?", "Chest: 40").await.unwrap();
        mock.assert_async().await;
        assert_eq!(reply, "Try a charcoal linen blazer.");
    }

    #[tokio::test]
    async fn test_advise_empty_reply() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"candidates": []}));
            })
            .await;

        let err = client_for(&server).advise("?", "").await.unwrap_err();
        assert!(matches!(err, GeminiError::EmptyResponse));
    }
}

//! Wire types for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn of plain text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            ..Self::default()
        }
    }
}

/// A turn in the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content, as used for system instructions.
    #[must_use]
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One piece of content: text or inline binary data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64-encoded binary data returned by image models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Zero budget disables thinking for faster replies.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

/// Response body from `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// The first inline data part of the first candidate that carries data.
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hi")],
            system_instruction: Some(Content::instruction("be brief")),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
                max_output_tokens: None,
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Navy "},{"text":"wool."}]},"finishReason":"STOP"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Navy wool."));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn test_first_inline_data_skips_text_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[
            {"text":"Here is your image"},
            {"inlineData":{"mimeType":"image/jpeg","data":"AAAA"}}
        ]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let data = response.first_inline_data().unwrap();
        assert_eq!(data.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(data.data, "AAAA");
    }
}

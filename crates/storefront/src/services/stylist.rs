//! "Tailor AI" chat transcript.
//!
//! The chat never fails from the shopper's point of view: a missing key,
//! a transport error or an empty reply each become a canned stylist message.

use std::sync::Arc;

use gimco_core::UserProfile;
use gimco_genai::{GeminiError, StyleAdvisor};
use tracing::{error, instrument};

/// Shown when no API key is configured.
pub const UNAVAILABLE_REPLY: &str = "I'm sorry, my connection to the fashion styling database (API Key) is currently unavailable. Please check the configuration.";
/// Shown when the model answers with nothing.
pub const EMPTY_REPLY: &str = "I was unable to generate a fashion recommendation at this time.";
/// Shown when the call fails.
pub const ERROR_REPLY: &str =
    "I'm having trouble connecting to the styling server right now. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Customer,
    Stylist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// One shopper's conversation with the stylist.
pub struct StylistChat {
    advisor: Option<Arc<dyn StyleAdvisor>>,
    transcript: Vec<ChatMessage>,
}

impl std::fmt::Debug for StylistChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylistChat")
            .field("advisor", &self.advisor.is_some())
            .field("transcript", &self.transcript)
            .finish()
    }
}

impl StylistChat {
    /// Open a chat greeting the shopper by name.
    #[must_use]
    pub fn new(customer: &UserProfile, advisor: Option<Arc<dyn StyleAdvisor>>) -> Self {
        Self {
            advisor,
            transcript: vec![ChatMessage {
                speaker: Speaker::Stylist,
                text: format!(
                    "Hello {}. I am your personal style consultant. How can I assist you with your wardrobe today?",
                    customer.name
                ),
            }],
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Ask a question. Blank questions are ignored and return `None`.
    ///
    /// The shopper's current measurements are sent as context.
    #[instrument(skip_all, fields(customer = %customer.id))]
    pub async fn ask(&mut self, customer: &UserProfile, query: &str) -> Option<&str> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage {
            speaker: Speaker::Customer,
            text: query.to_string(),
        });

        let reply = match &self.advisor {
            None => UNAVAILABLE_REPLY.to_string(),
            Some(advisor) => match advisor.advise(query, &customer.measurements.summary()).await {
                Ok(text) => text,
                Err(GeminiError::EmptyResponse) => EMPTY_REPLY.to_string(),
                Err(e) => {
                    error!(error = %e, "Stylist request failed");
                    ERROR_REPLY.to_string()
                }
            },
        };

        self.transcript.push(ChatMessage {
            speaker: Speaker::Stylist,
            text: reply,
        });
        self.transcript.last().map(|m| m.text.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use gimco_core::seed;

    use super::*;

    struct Scripted {
        reply: fn() -> Result<String, GeminiError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl StyleAdvisor for Scripted {
        async fn advise(&self, query: &str, measurements: &str) -> Result<String, GeminiError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), measurements.to_string()));
            (self.reply)()
        }
    }

    fn kevin() -> UserProfile {
        seed::customers().unwrap().into_iter().next().unwrap()
    }

    fn chat_with(reply: fn() -> Result<String, GeminiError>) -> (StylistChat, Arc<Scripted>) {
        let advisor = Arc::new(Scripted {
            reply,
            seen: Mutex::new(Vec::new()),
        });
        (StylistChat::new(&kevin(), Some(advisor.clone())), advisor)
    }

    #[test]
    fn test_greeting() {
        let chat = StylistChat::new(&kevin(), None);
        assert_eq!(
            chat.transcript().first().map(|m| m.text.as_str()),
            Some("Hello Kevin Kamau. I am your personal style consultant. How can I assist you with your wardrobe today?")
        );
    }

    #[tokio::test]
    async fn test_without_advisor_uses_unavailable_reply() {
        let mut chat = StylistChat::new(&kevin(), None);
        let reply = chat.ask(&kevin(), "What to wear?").await;
        assert_eq!(reply, Some(UNAVAILABLE_REPLY));
        assert_eq!(chat.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_reply_and_context() {
        let (mut chat, advisor) = chat_with(|| Ok("Go for navy.".to_string()));
        let reply = chat.ask(&kevin(), "  Wedding suit colour? ").await;
        assert_eq!(reply, Some("Go for navy."));

        let seen = advisor.seen.lock().unwrap();
        assert_eq!(
            seen.first(),
            Some(&("Wedding suit colour?".to_string(), "Chest: 42, Waist: 34, Inseam: 32".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failures_become_canned_replies() {
        let (mut chat, _) = chat_with(|| Err(GeminiError::EmptyResponse));
        assert_eq!(chat.ask(&kevin(), "hi").await, Some(EMPTY_REPLY));

        let (mut chat, _) = chat_with(|| Err(GeminiError::RateLimited(5)));
        assert_eq!(chat.ask(&kevin(), "hi").await, Some(ERROR_REPLY));
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let (mut chat, advisor) = chat_with(|| Ok("unused".to_string()));
        assert_eq!(chat.ask(&kevin(), "   ").await, None);
        assert_eq!(chat.transcript().len(), 1);
        assert!(advisor.seen.lock().unwrap().is_empty());
    }
}

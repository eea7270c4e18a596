use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::provider::{LlmProvider, Message};

/// One exchange in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user: String,
    pub reply: String,
    /// False when `reply` holds an inline error instead of model output.
    pub ok: bool,
    pub at: DateTime<Utc>,
}

/// Append-only chat transcript.
///
/// Each message is sent to the model on its own; earlier turns are kept for
/// display but are not replayed as context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    temperature: f32,
    max_tokens: u32,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(0.7, 2048)
    }
}

impl ChatSession {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self { turns: Vec::new(), temperature, max_tokens }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Send `message` and record the outcome.
    ///
    /// Blank input records nothing and returns `None`. Provider failures are
    /// not returned as errors: they become the reply text of the new turn.
    pub async fn send(&mut self, provider: &dyn LlmProvider, message: &str) -> Option<&ChatTurn> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let result = provider
            .complete(vec![Message::user(message)], self.temperature, self.max_tokens)
            .await;

        let (reply, ok) = match result {
            Ok(reply) => {
                debug!(provider = provider.name(), chars = reply.len(), "chat reply received");
                (reply, true)
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "chat request failed");
                (format!("⚠️ Error: {e}"), false)
            }
        };

        self.turns.push(ChatTurn {
            user: message.to_string(),
            reply,
            ok,
            at: Utc::now(),
        });
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::provider::{LlmError, Role};

    struct Echo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for Echo {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].role, Role::User);
            Ok(format!("echo: {}", messages[0].content))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    struct Down;

    #[async_trait]
    impl LlmProvider for Down {
        async fn complete(
            &self,
            _messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Err(LlmError::ApiError { status: 503, body: "overloaded".into() })
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test]
    async fn message_is_trimmed_and_recorded() {
        let provider = Echo { calls: AtomicUsize::new(0) };
        let mut chat = ChatSession::default();

        let turn = chat.send(&provider, "  hello  ").await.unwrap();
        assert_eq!(turn.user, "hello");
        assert_eq!(turn.reply, "echo: hello");
        assert!(turn.ok);
        assert_eq!(chat.len(), 1);
    }

    #[tokio::test]
    async fn blank_message_is_ignored() {
        let provider = Echo { calls: AtomicUsize::new(0) };
        let mut chat = ChatSession::default();

        assert!(chat.send(&provider, " \n\t").await.is_none());
        assert!(chat.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_becomes_inline_reply() {
        let mut chat = ChatSession::default();

        let turn = chat.send(&Down, "anyone there?").await.unwrap();
        assert!(!turn.ok);
        assert_eq!(turn.reply, "⚠️ Error: API error 503: overloaded");
    }

    #[tokio::test]
    async fn turns_keep_send_order() {
        let provider = Echo { calls: AtomicUsize::new(0) };
        let mut chat = ChatSession::default();
        chat.send(&provider, "one").await;
        chat.send(&Down, "two").await;
        chat.send(&provider, "three").await;

        let users: Vec<_> = chat.turns().iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, ["one", "two", "three"]);
    }
}

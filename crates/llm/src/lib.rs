pub mod chat;
pub mod provider;
pub mod providers;
pub mod summarize;

pub use chat::{ChatSession, ChatTurn};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::{create_provider, Unconfigured};
pub use summarize::{
    Aggregator, HuggingFaceSummarizer, LlmSummarizer, SummarizeError, Summarizer,
    SummaryBounds,
};

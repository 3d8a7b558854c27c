//! OpenAI-style chat completions provider (`gpt`).
//!
//! Turns are sent as structured `{role, content}` entries and the reply is
//! read from the first choice's message content.

mod adapter;
mod transport;
mod types;

pub use adapter::GptAdapter;
pub use transport::HttpChatTransport;

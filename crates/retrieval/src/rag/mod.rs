//! Document chat: question answering over one uploaded document.
//!
//! The session holds the resident document; the chat retrieves context from
//! it and hands `Context + Question` to a completion provider.

pub mod chat;
pub mod session;

pub use chat::{build_prompt, ChatAnswer, DocumentChat};
pub use session::{Document, DocumentSession};

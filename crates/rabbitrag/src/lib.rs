//! rabbitrag command implementations
//!
//! `scrape` builds the record file; `chat` answers questions grounded in it

pub mod chat;
pub mod commands;

pub use chat::{parse_input, ChatSession, Input};
pub use commands::{run_chat, run_scrape};

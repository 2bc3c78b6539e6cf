//! Prompt templates for grounded answers

use crate::types::ChatMessage;

/// System prompt preamble restricting the model to the supplied context
pub const INSTRUCTION_HEADER: &str = "You are a helpful chatbot.
Use only the following pieces of context to answer the question. Don't make up any new information:";

/// System prompt listing each context chunk on its own ` - ` line
pub fn instruction_prompt<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let context: Vec<String> = chunks.into_iter().map(|c| format!(" - {}", c)).collect();
    format!("{}\n{}\n", INSTRUCTION_HEADER, context.join("\n"))
}

/// System + user message pair for one grounded question
pub fn grounded_messages<'a, I>(chunks: I, query: &str) -> Vec<ChatMessage>
where
    I: IntoIterator<Item = &'a str>,
{
    vec![
        ChatMessage::system(instruction_prompt(chunks)),
        ChatMessage::user(query),
    ]
}

//! Interactive grounded question answering

use futures::StreamExt;
use rabbitrag_common::Result;
use rabbitrag_llm::{grounded_messages, ChatProvider};
use rabbitrag_vector::{Retriever, ScoredResult, VectorStore};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

const PROMPT: &str = "Ask me a question: ";
const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "/bye"];

/// One line of user input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Leave the loop
    Exit,
    /// Blank line, prompt again
    Empty,
    /// A question to answer
    Question(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        Input::Empty
    } else if EXIT_COMMANDS.iter().any(|c| line.eq_ignore_ascii_case(c)) {
        Input::Exit
    } else {
        Input::Question(line.to_string())
    }
}

/// Read-retrieve-answer loop over a populated store
pub struct ChatSession<'a> {
    retriever: Retriever<'a>,
    chat: Arc<dyn ChatProvider>,
    model: String,
    top_n: usize,
}

impl<'a> ChatSession<'a> {
    pub fn new(
        store: &'a VectorStore,
        chat: Arc<dyn ChatProvider>,
        model: impl Into<String>,
        top_n: usize,
    ) -> Self {
        Self {
            retriever: Retriever::new(store),
            chat,
            model: model.into(),
            top_n,
        }
    }

    /// Prompt for questions until exit command, end of input or Ctrl-C.
    ///
    /// A failed question is reported and the loop continues.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };

            let question = match line.as_deref().map(parse_input) {
                None | Some(Input::Exit) => break,
                Some(Input::Empty) => continue,
                Some(Input::Question(question)) => question,
            };

            let outcome = tokio::select! {
                result = self.answer(&question, out) => Some(result),
                _ = tokio::signal::ctrl_c() => None,
            };

            match outcome {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    error!("Failed to answer question: {}", e);
                    writeln!(out, "\nError: {}", e)?;
                }
                None => {
                    writeln!(out)?;
                    break;
                }
            }
        }

        writeln!(out)?;
        info!("Chat session ended");
        Ok(())
    }

    /// Retrieve context for `question`, print it, then stream the model's answer
    pub async fn answer<W: Write>(&self, question: &str, out: &mut W) -> Result<()> {
        let results = self.retriever.retrieve(question, self.top_n).await?;

        writeln!(out, "Retrieved knowledge:")?;
        if results.is_empty() {
            writeln!(out, " (no matching records)")?;
            return Ok(());
        }
        for result in &results {
            writeln!(out, "{}", format_result(result))?;
        }

        let messages = grounded_messages(results.iter().map(|r| r.chunk.as_str()), question);
        let mut fragments = self.chat.chat_stream(&self.model, messages).await?;

        writeln!(out, "Chatbot response:")?;
        while let Some(fragment) = fragments.next().await {
            write!(out, "{}", fragment?)?;
            out.flush()?;
        }
        writeln!(out)?;

        Ok(())
    }
}

fn format_result(result: &ScoredResult) -> String {
    format!(" - (similarity: {:.2}) {}", result.score, result.chunk)
}

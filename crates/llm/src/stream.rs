//! NDJSON decoding of streamed chat replies

use futures::stream::{self, BoxStream, Stream, StreamExt};
use rabbitrag_common::{RabbitRagError, Result};

use crate::types::ChatResponse;

/// Lazy, finite sequence of reply fragments. Consumed once.
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// Buffers raw bytes and yields complete lines
#[derive(Debug, Default)]
struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|b| *b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Trailing line without a newline terminator
    fn take_rest(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buf);
        let line = String::from_utf8_lossy(&rest).trim().to_string();
        (!line.is_empty()).then_some(line)
    }
}

struct DecodeState {
    body: BoxStream<'static, std::result::Result<Vec<u8>, String>>,
    lines: LineBuffer,
    eof: bool,
    done: bool,
}

/// Turn a byte stream of Ollama chat NDJSON into content fragments.
///
/// Lines may be split across network chunks. Empty fragments are dropped,
/// the stream ends at the first `"done": true` line or at end of body, and
/// an `error` line ends it with [`RabbitRagError::Chat`].
pub fn decode_chat_stream<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: std::fmt::Display + 'static,
{
    let body = body
        .map(|item| item.map(|b| b.as_ref().to_vec()).map_err(|e| e.to_string()))
        .boxed();

    let state = DecodeState {
        body,
        lines: LineBuffer::default(),
        eof: false,
        done: false,
    };

    stream::try_unfold(state, next_fragment).boxed()
}

async fn next_fragment(mut state: DecodeState) -> Result<Option<(String, DecodeState)>> {
    loop {
        if state.done {
            return Ok(None);
        }

        let line = match state.lines.next_line() {
            Some(line) => Some(line),
            None if state.eof => match state.lines.take_rest() {
                Some(rest) => Some(rest),
                None => return Ok(None),
            },
            None => None,
        };

        let Some(line) = line else {
            match state.body.next().await {
                Some(Ok(bytes)) => state.lines.push(&bytes),
                Some(Err(e)) => {
                    return Err(RabbitRagError::network(format!("Chat stream interrupted: {}", e)))
                }
                None => state.eof = true,
            }
            continue;
        };

        if line.is_empty() {
            continue;
        }

        let chunk: ChatResponse = serde_json::from_str(&line)
            .map_err(|e| RabbitRagError::chat(format!("Malformed stream line: {}", e)))?;

        if let Some(error) = chunk.error {
            return Err(RabbitRagError::chat(error));
        }

        state.done = chunk.done;
        if let Some(message) = chunk.message {
            if !message.content.is_empty() {
                return Ok(Some((message.content, state)));
            }
        }
    }
}

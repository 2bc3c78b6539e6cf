use futures::TryStreamExt;
use mockito::{Matcher, Server};
use rabbitrag_common::RabbitRagError;
use rabbitrag_llm::{grounded_messages, ChatProvider, EmbeddingProvider, OllamaClient};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &Server, max_retries: u32) -> OllamaClient {
    OllamaClient::new(server.url(), Duration::from_secs(5))
        .unwrap()
        .with_max_retries(max_retries)
}

#[tokio::test]
async fn test_embed_returns_first_embedding() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/embed")
        .match_body(Matcher::PartialJson(json!({
            "model": "bge-base",
            "input": "Luna (Holland Lop, 2 years, Female): Friendly."
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model":"bge-base","embeddings":[[0.5,0.25,1.0]]}"#)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    let embedding = client
        .embed("bge-base", "Luna (Holland Lop, 2 years, Female): Friendly.")
        .await
        .unwrap();

    assert_eq!(embedding, vec![0.5, 0.25, 1.0]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_empty_result_is_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/embed")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model":"bge-base","embeddings":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    let err = client.embed("bge-base", "hello").await.unwrap_err();

    assert!(matches!(err, RabbitRagError::EmptyEmbedding));
    assert!(err.is_provider_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_retries_then_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/embed")
        .with_status(500)
        .with_body("model crashed")
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server, 2);
    let err = EmbeddingProvider::embed(&client, "bge-base", "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, RabbitRagError::Embedding(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_stream_yields_fragments() {
    let body = concat!(
        r#"{"model":"llama","message":{"role":"assistant","content":"Luna "},"done":false}"#,
        "\n",
        r#"{"model":"llama","message":{"role":"assistant","content":"is litter-trained."},"done":false}"#,
        "\n",
        r#"{"model":"llama","message":{"role":"assistant","content":""},"done":true}"#,
        "\n",
    );

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama",
            "stream": true
        })))
        .with_status(200)
        .with_header("content-type", "application/x-ndjson")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    let messages = grounded_messages(["Luna (Holland Lop): litter-trained"], "Who is litter-trained?");
    let fragments: Vec<String> = client
        .chat_stream("llama", messages)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(fragments.concat(), "Luna is litter-trained.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_stream_http_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(404)
        .with_body(r#"{"error":"model 'llama' not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    let result = ChatProvider::chat_stream(&client, "llama", grounded_messages([], "hi")).await;

    assert!(matches!(result, Err(RabbitRagError::Chat(_))));
}

#[tokio::test]
async fn test_connection() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    assert!(client.test_connection().await.unwrap());
}

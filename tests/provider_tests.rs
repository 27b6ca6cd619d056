//! HTTP-level tests for the OpenAI and Anthropic backends.

use dialectic::error::{DialecticError, ERROR_MARKER};
use dialectic::types::Message;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(feature = "openai")]
mod openai {
    use super::*;
    use dialectic::models::OpenAiModel;
    use dialectic::provider::openai::OpenAiBackend;
    use dialectic::provider::ChatBackend;

    fn backend(server: &MockServer) -> OpenAiBackend {
        OpenAiBackend::new(
            OpenAiModel::Gpt35Turbo,
            Some("test-key".to_string()),
            Some(server.uri()),
        )
    }

    #[tokio::test]
    async fn chat_completion_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 1000,
                "messages": [
                    {"role": "user", "content": "hello"},
                    {"role": "assistant", "content": "hi"},
                    {"role": "user", "content": "how are you?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Quite well."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend(&server)
            .send(&[
                Message::user("hello"),
                Message::assistant("hi"),
                Message::user("how are you?"),
            ])
            .await
            .expect("completion should succeed");

        assert_eq!(reply, "Quite well.");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send(&[Message::user("hello")])
            .await
            .expect_err("401 should fail");

        assert!(
            matches!(&err, DialecticError::Authentication(m) if m == "Incorrect API key provided")
        );
        assert!(err.diagnostic_reply().starts_with(ERROR_MARKER));
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send(&[Message::user("hello")])
            .await
            .expect_err("no choices should fail");

        assert!(matches!(err, DialecticError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn server_error_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send(&[Message::user("hello")])
            .await
            .expect_err("502 should fail");

        assert_eq!(err.to_string(), "API error (status 502): bad gateway");
    }
}

#[cfg(feature = "anthropic")]
mod anthropic {
    use super::*;
    use dialectic::models::AnthropicModel;
    use dialectic::provider::anthropic::AnthropicBackend;
    use dialectic::provider::ChatBackend;

    fn backend(server: &MockServer) -> AnthropicBackend {
        AnthropicBackend::new(
            AnthropicModel::Claude3Haiku,
            Some("test-key".to_string()),
            Some(server.uri()),
        )
        .with_max_tokens(300)
    }

    #[tokio::test]
    async fn messages_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 300,
                "system": "Answer in one sentence.",
                "messages": [{"role": "user", "content": "What is a dialectic?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "A method of argument "},
                    {"type": "text", "text": "through opposing views."}
                ],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend(&server)
            .send(&[
                Message::system("Answer in one sentence."),
                Message::user("What is a dialectic?"),
            ])
            .await
            .expect("message should succeed");

        assert_eq!(reply, "A method of argument through opposing views.");
    }

    #[tokio::test]
    async fn response_without_text_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_2",
                "content": []
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send(&[Message::user("hello")])
            .await
            .expect_err("empty content should fail");

        assert!(
            matches!(err, DialecticError::MalformedResponse { ref provider, .. } if provider == "anthropic")
        );
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "type": "error",
                "error": {"type": "rate_limit_error", "message": "slow down"}
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .send(&[Message::user("hello")])
            .await
            .expect_err("429 should fail");

        assert!(matches!(err, DialecticError::RateLimited { .. }));
    }
}

use std::sync::Arc;

use super::canned::{canned_answer, CannedTopic};
use super::openai::OpenAiClient;
use super::ChatError;
use crate::config::RelayConfig;

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Canned(CannedTopic),
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswer {
    pub answer: String,
    pub source: AnswerSource,
}

/// Stateless question relay. Cheap to share behind `Arc`.
pub struct ChatRelay {
    config: Arc<RelayConfig>,
    client: OpenAiClient,
}

impl ChatRelay {
    pub fn new(config: Arc<RelayConfig>) -> Result<Self, ChatError> {
        let client = OpenAiClient::new(&config.upstream_url, config.upstream_timeout)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Answer one question.
    ///
    /// Check order is fixed: input validation, then the credential, then
    /// mock mode, then the upstream call. A missing credential fails even
    /// when mock mode would not need it.
    pub async fn ask(&self, question: Option<&str>) -> Result<ChatAnswer, ChatError> {
        let question = match question {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(ChatError::InvalidQuestion),
        };

        let Some(api_key) = self.config.api_key.as_ref() else {
            tracing::error!("OPENAI_API_KEY missing in environment");
            return Err(ChatError::MissingCredential);
        };

        if self.config.mock_responses {
            let (topic, answer) = canned_answer(question);
            tracing::info!(?topic, "Using mock response");
            return Ok(ChatAnswer {
                answer,
                source: AnswerSource::Canned(topic),
            });
        }

        tracing::debug!(url = self.client.url(), question_len = question.len(), "Forwarding question upstream");
        let answer = self.client.complete(api_key, question).await?;

        Ok(ChatAnswer {
            answer,
            source: AnswerSource::Upstream,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use zeroize::Zeroizing;

    /// What the stub upstream saw.
    #[derive(Debug, Clone)]
    pub(crate) struct CapturedRequest {
        pub authorization: Option<String>,
        pub body: serde_json::Value,
    }

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        body: String,
        seen: Arc<Mutex<Vec<CapturedRequest>>>,
    }

    async fn stub_handler(
        State(stub): State<StubState>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        let captured = CapturedRequest {
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        };
        stub.seen.lock().unwrap().push(captured);
        (stub.status, stub.body.clone())
    }

    /// Spawn a stub chat-completions server answering every POST with
    /// `status` and `body`. Returns its URL and the captured requests.
    pub(crate) async fn spawn_upstream(
        status: StatusCode,
        body: &str,
    ) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let stub = StubState {
            status,
            body: body.to_string(),
            seen: seen.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(stub_handler))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/v1/chat/completions"), seen)
    }

    pub(crate) fn answer_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
        .to_string()
    }

    fn relay_with(url: &str, api_key: Option<&str>, mock: bool) -> ChatRelay {
        let config = RelayConfig {
            api_key: api_key.map(|k| Zeroizing::new(k.to_string())),
            mock_responses: mock,
            upstream_url: url.to_string(),
            ..RelayConfig::default()
        };
        ChatRelay::new(Arc::new(config)).unwrap()
    }

    #[tokio::test]
    async fn relays_upstream_answer() {
        let (url, seen) = spawn_upstream(StatusCode::OK, &answer_body("Stay hydrated.")).await;
        let relay = relay_with(&url, Some("sk-test"), false);

        let answer = relay.ask(Some("How much water per day?")).await.unwrap();
        assert_eq!(answer.answer, "Stay hydrated.");
        assert_eq!(answer.source, AnswerSource::Upstream);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(seen[0].body["model"], "gpt-3.5-turbo");
        assert_eq!(seen[0].body["messages"][1]["content"], "How much water per day?");
    }

    #[tokio::test]
    async fn empty_and_missing_questions_are_rejected() {
        let relay = relay_with("http://127.0.0.1:9/unused", Some("sk-test"), false);
        for q in [None, Some(""), Some("   \n\t")] {
            let err = relay.ask(q).await.unwrap_err();
            assert!(matches!(err, ChatError::InvalidQuestion), "{q:?}");
        }
    }

    #[tokio::test]
    async fn invalid_question_checked_before_credential() {
        let relay = relay_with("http://127.0.0.1:9/unused", None, true);
        let err = relay.ask(Some(" ")).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidQuestion));
    }

    #[tokio::test]
    async fn missing_credential_beats_mock_mode() {
        let relay = relay_with("http://127.0.0.1:9/unused", None, true);
        let err = relay.ask(Some("chest pain")).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential));
        assert_eq!(err.to_string(), "Server misconfiguration: OPENAI_API_KEY missing");
    }

    #[tokio::test]
    async fn mock_mode_skips_upstream() {
        let (url, seen) = spawn_upstream(StatusCode::OK, &answer_body("live")).await;
        let relay = relay_with(&url, Some("sk-test"), true);

        let answer = relay.ask(Some("Sharp chest pain when climbing stairs")).await.unwrap();
        assert_eq!(answer.source, AnswerSource::Canned(CannedTopic::Cardiac));
        assert_eq!(answer.answer, CannedTopic::Cardiac.template());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_error_status_and_message_relayed() {
        let body = r#"{"error":{"message":"Rate limit reached for gpt-3.5-turbo","type":"requests"}}"#;
        let (url, _) = spawn_upstream(StatusCode::TOO_MANY_REQUESTS, body).await;
        let relay = relay_with(&url, Some("sk-test"), false);

        let err = relay.ask(Some("Is coffee bad for me?")).await.unwrap_err();
        match err {
            ChatError::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached for gpt-3.5-turbo");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_success_without_answer_is_no_answer() {
        let (url, _) = spawn_upstream(StatusCode::OK, r#"{"choices":[]}"#).await;
        let relay = relay_with(&url, Some("sk-test"), false);

        let err = relay.ask(Some("Anything?")).await.unwrap_err();
        assert!(matches!(err, ChatError::NoAnswer));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let relay = relay_with(&format!("http://127.0.0.1:{port}/v1/chat/completions"), Some("sk-test"), false);
        let err = relay.ask(Some("Hello?")).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}

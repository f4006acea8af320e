use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ChatError;

/// Chat model requested from the provider.
pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.3;

/// Persona and safety guidelines sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are Dr. HealthBot, a knowledgeable healthcare AI assistant specializing in general medical information and health guidance. 

IMPORTANT MEDICAL DISCLAIMER: You are NOT a replacement for professional medical advice, diagnosis, or treatment. Always recommend consulting with qualified healthcare professionals for serious medical concerns.

Your expertise includes:
- General health information and wellness advice
- Common symptoms explanation and when to seek medical attention
- Medication information and interactions
- Preventive care and healthy lifestyle recommendations
- First aid and emergency guidance
- Chronic condition management support
- Mental health awareness and resources

Guidelines:
1. Always prioritize patient safety
2. Recommend professional medical consultation for serious symptoms
3. Provide evidence-based information when possible
4. Use clear, empathetic language
5. Include relevant disclaimers for medical advice
6. Suggest emergency services (911/emergency room) for urgent situations
7. Be supportive and non-judgmental
8. Focus on education and empowerment

Remember: You are a helpful assistant that provides general health information, not a licensed medical professional.";

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// One non-streaming POST per question. No retries.
#[derive(Clone)]
pub struct OpenAiClient {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the provider a single question and return the answer text.
    pub async fn complete(&self, api_key: &str, question: &str) -> Result<String, ChatError> {
        let body = ChatCompletionRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Transport(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    ChatError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = upstream_error_message(&raw, status);
            tracing::error!(status = status.as_u16(), error = %message, "OpenAI API returned error");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read OpenAI response body");
                return Err(ChatError::NoAnswer);
            }
        };

        match extract_answer(&raw) {
            Some(answer) => Ok(answer),
            None => {
                tracing::error!(body_len = raw.len(), "No answer in OpenAI response");
                Err(ChatError::NoAnswer)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    /// Legacy completions shape.
    text: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Pull the answer out of a success body: `choices[0].message.content`,
/// falling back to `choices[0].text` only when the content is absent.
/// An empty answer counts as missing.
fn extract_answer(raw: &str) -> Option<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(raw).ok()?;
    let first = parsed.choices.into_iter().next()?;
    let answer = match first.message.and_then(|m| m.content) {
        Some(content) => content,
        None => first.text?,
    };
    (!answer.is_empty()).then_some(answer)
}

/// Turn an error body into a message for the client.
///
/// JSON bodies yield `error.message` when present, else the JSON itself.
/// Non-JSON bodies are relayed as-is. An empty body falls back to the
/// status reason phrase.
fn upstream_error_message(raw: &str, status: reqwest::StatusCode) -> String {
    let text = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| json.to_string()),
        Err(_) => raw.to_string(),
    };

    if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn request_body_shape() {
        let body = ChatCompletionRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "Is it safe to run with a cold?",
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(SYSTEM_PROMPT.starts_with(
            "You are Dr. HealthBot, a knowledgeable healthcare AI assistant specializing in general medical information and health guidance. \n\nIMPORTANT"
        ));
        assert!(json["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("You are Dr. HealthBot"));
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Is it safe to run with a cold?");
    }

    #[test]
    fn extracts_message_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Drink water."}}]}"#;
        assert_eq!(extract_answer(raw).as_deref(), Some("Drink water."));
    }

    #[test]
    fn falls_back_to_legacy_text() {
        let raw = r#"{"choices":[{"text":"Rest well."}]}"#;
        assert_eq!(extract_answer(raw).as_deref(), Some("Rest well."));
        let raw = r#"{"choices":[{"message":{"content":null},"text":"Rest well."}]}"#;
        assert_eq!(extract_answer(raw).as_deref(), Some("Rest well."));
    }

    #[test]
    fn empty_content_does_not_fall_back_to_text() {
        let raw = r#"{"choices":[{"message":{"content":""},"text":"Rest well."}]}"#;
        assert!(extract_answer(raw).is_none());
    }

    #[test]
    fn missing_or_empty_answer_is_none() {
        assert!(extract_answer(r#"{"choices":[]}"#).is_none());
        assert!(extract_answer(r#"{}"#).is_none());
        assert!(extract_answer(r#"{"choices":[{"message":{"content":""}}]}"#).is_none());
        assert!(extract_answer(r#"{"choices":[{"message":{"content":null}}]}"#).is_none());
        assert!(extract_answer("not json").is_none());
    }

    #[tokio::test]
    async fn unreadable_success_body_is_no_answer() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // Read the whole request before answering.
            while !(request.ends_with(b"}") && request.windows(11).any(|w| w == b"temperature")) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            // Promise 200 bytes, send a fragment, then hang up.
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"choices\":",
                )
                .await
                .unwrap();
        });

        let client = OpenAiClient::new(
            &format!("http://{addr}/v1/chat/completions"),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = client.complete("sk-test", "Hello?").await.unwrap_err();
        assert!(matches!(err, ChatError::NoAnswer), "{err:?}");
    }

    #[test]
    fn error_message_from_structured_body() {
        let raw = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        assert_eq!(
            upstream_error_message(raw, StatusCode::TOO_MANY_REQUESTS),
            "You exceeded your current quota"
        );
    }

    #[test]
    fn error_message_from_unstructured_json() {
        let raw = r#"{"detail":"bad gateway"}"#;
        assert_eq!(
            upstream_error_message(raw, StatusCode::BAD_GATEWAY),
            r#"{"detail":"bad gateway"}"#
        );
    }

    #[test]
    fn error_message_from_plain_text_and_empty_body() {
        assert_eq!(
            upstream_error_message("upstream exploded", StatusCode::INTERNAL_SERVER_ERROR),
            "upstream exploded"
        );
        assert_eq!(
            upstream_error_message("", StatusCode::SERVICE_UNAVAILABLE),
            "Service Unavailable"
        );
    }
}

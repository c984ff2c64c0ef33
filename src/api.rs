use crate::{
    conversation::BotReply,
    errors::{ParleyError, ParleyResult},
    logging::{log_api_call, ApiCallLog},
};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;

/// Client for the answer service: `POST /ask` with a JSON question,
/// answered with `{"answer": ...}` or `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct AskClient {
    http: Client,
    endpoint: String,
}

/// Body of a successful `/ask` response. Both fields are optional; the
/// service sends whichever applies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskReply {
    /// Field selection mirrors the service contract: a non-empty
    /// `answer` wins, otherwise a non-empty `error`, otherwise nothing
    /// is rendered. An empty-string `answer` falls through to `error`.
    pub fn into_reply(self) -> BotReply {
        match self.answer {
            Some(answer) if !answer.is_empty() => BotReply::Answer(answer),
            _ => match self.error {
                Some(error) if !error.is_empty() => BotReply::Failure(error),
                _ => BotReply::Silent,
            },
        }
    }
}

impl AskClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends one question and returns the parsed reply body.
    ///
    /// No retry and no timeout: a request either settles into a reply
    /// or an error, and the caller renders whichever it gets.
    pub async fn ask(&self, question: &str) -> ParleyResult<AskReply> {
        let url = format!("{}/ask", self.endpoint);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .json(&json!({ "question": question }))
            .send()
            .await
            .map_err(|e| ParleyError::api_error(format!("request failed: {}", e)))?;

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: summarize(question),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(ParleyError::api_error(format!(
                "service returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ParleyError::api_error(format!("failed to parse response: {}", e)))
    }
}

fn summarize(question: &str) -> String {
    let mut chars = question.chars();
    let head: String = chars.by_ref().take(80).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_ask_posts_question_as_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "question": "what is RAG?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "hello" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let reply = client.ask("what is RAG?").await.unwrap();
        assert_eq!(reply.into_reply(), BotReply::Answer("hello".to_string()));
    }

    #[tokio::test]
    async fn test_ask_surfaces_service_error_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "bad question" })),
            )
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let reply = client.ask("???").await.unwrap();
        assert_eq!(
            reply.into_reply(),
            BotReply::Failure("bad question".to_string())
        );
    }

    #[tokio::test]
    async fn test_ask_with_neither_field_is_silent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let reply = client.ask("hi").await.unwrap();
        assert_eq!(reply.into_reply(), BotReply::Silent);
    }

    #[tokio::test]
    async fn test_empty_answer_falls_through_to_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "answer": "", "error": "no documents found" })),
            )
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let reply = client.ask("hi").await.unwrap();
        assert_eq!(
            reply.into_reply(),
            BotReply::Failure("no documents found".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let err = client.ask("hi").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = AskClient::new(mock_server.uri());
        let err = client.ask("hi").await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Nothing listens here; the connection itself fails.
        let client = AskClient::new("http://127.0.0.1:9");
        assert!(client.ask("hi").await.is_err());
    }

    #[test]
    fn test_empty_error_is_silent_too() {
        let reply = AskReply {
            answer: None,
            error: Some(String::new()),
        };
        assert_eq!(reply.into_reply(), BotReply::Silent);
    }
}

//! Hosted text-generation implementation of the `TextGenerator` trait.
//!
//! This file contains the HTTP client for a Hugging Face style inference
//! endpoint: bearer authentication, the `{"inputs": ...}` request body, and
//! decoding of the `[{"generated_text": ...}]` reply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use tracing::{debug, error};

use crate::{
    errors::AdapterError,
    models::{GeneratedText, GenerationRequest},
    TextGenerator,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HuggingFaceClient {
    client: Client,
    url: String,
    api_key: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl HuggingFaceClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AdapterError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&GenerationRequest { inputs: prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Text generation service error {status}: {body}");
            return Err(AdapterError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = match response.json::<GenerationResponse>().await? {
            GenerationResponse::Single(single) => single.generated_text,
            GenerationResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .map(|candidate| candidate.generated_text)
                .ok_or_else(|| AdapterError::Transport("empty generation response".to_string()))?,
        };

        debug!("Model generated text: {text}");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HuggingFaceClient {
        HuggingFaceClient::new(format!("{}/models/test", server.uri()), "hf_test_key").unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test"))
            .and(header("authorization", "Bearer hf_test_key"))
            .and(body_json(json!({ "inputs": "hello" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "hello world" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).await.generate("hello").await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn accepts_single_object_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generated_text": "ok" })))
            .mount(&server)
            .await;

        let text = client_for(&server).await.generate("prompt").await.unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.generate("prompt").await.unwrap_err();
        match err {
            AdapterError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model loading");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_batch_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server).await.generate("prompt").await.unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
    }

    #[tokio::test]
    async fn unexpected_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "nope" })))
            .mount(&server)
            .await;

        assert!(client_for(&server).await.generate("prompt").await.is_err());
    }
}

use serde::Deserialize;
use serde_json::json;
use std::sync::OnceLock;
use std::time::Duration;

use super::{GenerationError, SamplingOptions, TextGenerator};

/// Connection settings for an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpGeneratorConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl HttpGeneratorConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            timeout,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

/// Blocking HTTP adapter. Callers on an async runtime must invoke it from a
/// blocking task.
#[derive(Debug)]
pub struct HttpTextGenerator {
    config: HttpGeneratorConfig,
    client: OnceLock<Result<reqwest::blocking::Client, String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl HttpTextGenerator {
    pub fn new(config: HttpGeneratorConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &HttpGeneratorConfig {
        &self.config
    }

    // Built lazily so construction never happens on an async worker thread.
    fn client(&self) -> Result<&reqwest::blocking::Client, GenerationError> {
        self.client
            .get_or_init(|| {
                reqwest::blocking::Client::builder()
                    .timeout(self.config.timeout)
                    .build()
                    .map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(|reason| GenerationError::Unavailable(reason.clone()))
    }

    fn map_transport(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            GenerationError::Unavailable(err.to_string())
        }
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingOptions,
    ) -> Result<String, GenerationError> {
        let client = self.client()?;
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "num_predict": sampling.max_tokens,
                "temperature": sampling.temperature,
                "top_k": sampling.top_k,
                "top_p": sampling.top_p,
                "repeat_penalty": sampling.repeat_penalty,
            },
        });

        let response = client
            .post(self.config.generate_url())
            .json(&body)
            .send()
            .map_err(|err| self.map_transport(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Unavailable(format!(
                "endpoint responded with {status}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .map_err(|err| GenerationError::InvalidResponse(err.to_string()))?;
        Ok(payload.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn generate_url_joins_without_duplicate_slashes() {
        let config = HttpGeneratorConfig::new(
            "http://localhost:11434/",
            "tinyllama",
            Duration::from_secs(5),
        );
        assert_eq!(config.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn unreachable_endpoint_reports_unavailable() {
        let generator = HttpTextGenerator::new(HttpGeneratorConfig::new(
            "http://127.0.0.1:9",
            "tinyllama",
            Duration::from_secs(2),
        ));
        let error = generator
            .generate("hello", &SamplingOptions::RATIONALE)
            .expect_err("nothing listens on port 9");
        assert!(matches!(
            error,
            GenerationError::Unavailable(_) | GenerationError::Timeout { .. }
        ));
    }

    fn generator_for(server: &MockServer) -> Arc<HttpTextGenerator> {
        Arc::new(HttpTextGenerator::new(HttpGeneratorConfig::new(
            server.uri(),
            "tinyllama",
            Duration::from_secs(5),
        )))
    }

    async fn generate_blocking(
        generator: Arc<HttpTextGenerator>,
        sampling: SamplingOptions,
    ) -> Result<String, GenerationError> {
        tokio::task::spawn_blocking(move || generator.generate("Why term cover?", &sampling))
            .await
            .expect("blocking task joins")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn posts_model_prompt_and_sampling_then_reads_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "tinyllama",
                "prompt": "Why term cover?",
                "stream": false,
                "options": { "num_predict": 80, "top_k": 40 },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "tinyllama",
                "response": "Term cover is pure protection.",
                "done": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = generate_blocking(generator_for(&server), SamplingOptions::ANSWER)
            .await
            .expect("generation succeeds");
        assert_eq!(answer, "Term cover is pure protection.");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_errors_report_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = generate_blocking(generator_for(&server), SamplingOptions::RATIONALE)
            .await
            .expect_err("500 is not a generation");
        match error {
            GenerationError::Unavailable(reason) => assert!(reason.contains("500")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_body_reports_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "text": "wrong field" })),
            )
            .mount(&server)
            .await;

        let error = generate_blocking(generator_for(&server), SamplingOptions::RATIONALE)
            .await
            .expect_err("missing response field");
        assert!(matches!(error, GenerationError::InvalidResponse(_)));
    }
}

//! Fetch Responses use case
//!
//! Acquires one [`PersonaResponseSet`] per query: builds the director prompt,
//! makes the single backend call and decodes the payload. Every failure mode
//! resolves to a canned set, so [`FetchResponsesUseCase::fetch`] is
//! infallible.

use crate::config::BehaviorConfig;
use crate::ports::credential::CredentialSource;
use crate::ports::director_gateway::{DirectorGateway, GatewayError};
use consilium_domain::core::string::preview;
use consilium_domain::director::{connection_failed_responses, locked_responses};
use consilium_domain::{Credential, DecodeTier, DirectorPrompt, PersonaResponseSet, Query, decode};
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum payload characters included in a decode-failure log line
const PAYLOAD_PREVIEW_LEN: usize = 200;

/// Where a fetched response set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tier")]
pub enum ResponseSource {
    /// No credential configured; canned locked set
    Locked,
    /// Transport or backend failure; canned connection-failed set
    ConnectionFailed,
    /// Backend payload went through the decoder
    Decoded(DecodeTier),
}

/// Output of one fetch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub responses: PersonaResponseSet,
    pub source: ResponseSource,
}

impl FetchResult {
    fn locked() -> Self {
        Self {
            responses: locked_responses(),
            source: ResponseSource::Locked,
        }
    }

    fn connection_failed() -> Self {
        Self {
            responses: connection_failed_responses(),
            source: ResponseSource::ConnectionFailed,
        }
    }
}

/// Use case for acquiring the four persona responses
pub struct FetchResponsesUseCase<G: DirectorGateway + 'static> {
    gateway: Arc<G>,
    credential: Option<Credential>,
    behavior: BehaviorConfig,
}

impl<G: DirectorGateway + 'static> FetchResponsesUseCase<G> {
    /// Create the use case. The credential is read once, here.
    pub fn new(gateway: Arc<G>, credentials: &dyn CredentialSource) -> Self {
        Self {
            gateway,
            credential: credentials.credential(),
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Whether a credential is configured (online) or not (offline)
    pub fn is_online(&self) -> bool {
        self.credential.is_some()
    }

    /// Run one fetch cycle. Never fails.
    pub async fn fetch(&self, query: &Query) -> FetchResult {
        let Some(credential) = &self.credential else {
            warn!("No backend credential configured; returning locked responses");
            tokio::time::sleep(self.behavior.locked_delay).await;
            return FetchResult::locked();
        };

        let prompt = DirectorPrompt::build(query);
        debug!("Director prompt built ({} chars)", prompt.as_str().len());

        let payload = match self.request(&prompt, credential).await {
            Ok(payload) => payload,
            Err(e) => {
                match &e {
                    GatewayError::Status { status, body } => {
                        warn!(
                            "Director request failed with HTTP {}: {}",
                            status,
                            preview(body, PAYLOAD_PREVIEW_LEN)
                        );
                    }
                    other => warn!("Director request failed: {}", other),
                }
                return FetchResult::connection_failed();
            }
        };

        let outcome = decode(&payload);
        let tier = outcome.tier();
        match tier {
            DecodeTier::Direct => debug!("Payload decoded directly"),
            DecodeTier::Cleanup => debug!("Payload decoded after stripping code fences"),
            DecodeTier::Fallback => warn!(
                "Payload could not be decoded; using placeholders: {}",
                preview(&payload, PAYLOAD_PREVIEW_LEN)
            ),
        }

        info!("Fetched persona responses ({:?})", tier);
        FetchResult {
            responses: outcome.into_responses(),
            source: ResponseSource::Decoded(tier),
        }
    }

    /// Call the gateway, turning a panic inside the adapter into an error
    async fn request(
        &self,
        prompt: &DirectorPrompt,
        credential: &Credential,
    ) -> Result<String, GatewayError> {
        match AssertUnwindSafe(self.gateway.generate(prompt, credential))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::ConnectionError(
                "gateway panicked during request".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::credential::StaticCredential;
    use async_trait::async_trait;
    use consilium_domain::director::unrecognized_responses;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    enum Reply {
        Payload(String),
        Status(u16),
        Empty,
        Panic,
    }

    struct FakeGateway {
        reply: Reply,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeGateway {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DirectorGateway for FakeGateway {
        async fn generate(
            &self,
            prompt: &DirectorPrompt,
            credential: &Credential,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(!prompt.as_str().contains(credential.expose()));
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Reply::Payload(text) => Ok(text.clone()),
                Reply::Status(status) => Err(GatewayError::Status {
                    status: *status,
                    body: "{\"error\": \"boom\"}".to_string(),
                }),
                Reply::Empty => Err(GatewayError::EmptyPayload),
                Reply::Panic => panic!("adapter bug"),
            }
        }
    }

    fn online() -> StaticCredential {
        StaticCredential::new(Credential::new("test-key"))
    }

    fn query(text: &str) -> Query {
        Query::parse(text).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_credential_skips_network_and_waits() {
        let gateway = FakeGateway::new(Reply::Payload("{}".to_string()));
        let use_case = FetchResponsesUseCase::new(gateway.clone(), &StaticCredential::absent());
        assert!(!use_case.is_online());

        let start = tokio::time::Instant::now();
        let result = use_case.fetch(&query("test")).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_millis(1600));
        assert_eq!(result.source, ResponseSource::Locked);
        assert_eq!(result.responses, locked_responses());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_payload_is_decoded_exactly() {
        let payload = r#"{"gemini": "G", "claude": "C", "gpt": "P", "grok": "X"}"#;
        let gateway = FakeGateway::new(Reply::Payload(payload.to_string()));
        let use_case = FetchResponsesUseCase::new(gateway.clone(), &online());

        let result = use_case.fetch(&query("What is Rust?")).await;

        assert_eq!(result.source, ResponseSource::Decoded(DecodeTier::Direct));
        assert_eq!(result.responses, PersonaResponseSet::new("G", "C", "P", "X"));
        assert_eq!(gateway.calls(), 1);
        assert!(gateway.prompts.lock().unwrap()[0].contains("USER QUERY: \"What is Rust?\""));
    }

    #[tokio::test]
    async fn test_fenced_payload_uses_cleanup_tier() {
        let payload = "```json\n{\"gemini\": \"G\", \"claude\": \"C\", \"gpt\": \"P\", \"grok\": \"X\"}\n```";
        let gateway = FakeGateway::new(Reply::Payload(payload.to_string()));
        let use_case = FetchResponsesUseCase::new(gateway, &online());

        let result = use_case.fetch(&query("q")).await;
        assert_eq!(result.source, ResponseSource::Decoded(DecodeTier::Cleanup));
    }

    #[tokio::test]
    async fn test_garbage_payload_uses_placeholders() {
        let gateway = FakeGateway::new(Reply::Payload("I refuse to emit JSON".to_string()));
        let use_case = FetchResponsesUseCase::new(gateway, &online());

        let result = use_case.fetch(&query("q")).await;
        assert_eq!(result.source, ResponseSource::Decoded(DecodeTier::Fallback));
        assert_eq!(result.responses, unrecognized_responses());
    }

    #[tokio::test]
    async fn test_http_failure_returns_connection_failed_set() {
        let gateway = FakeGateway::new(Reply::Status(500));
        let use_case = FetchResponsesUseCase::new(gateway.clone(), &online());

        let result = use_case.fetch(&query("q")).await;
        assert_eq!(result.source, ResponseSource::ConnectionFailed);
        assert_eq!(result.responses, connection_failed_responses());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_treated_as_failure() {
        let gateway = FakeGateway::new(Reply::Empty);
        let use_case = FetchResponsesUseCase::new(gateway, &online());

        let result = use_case.fetch(&query("q")).await;
        assert_eq!(result.source, ResponseSource::ConnectionFailed);
    }

    #[tokio::test]
    async fn test_panicking_gateway_does_not_escape() {
        let gateway = FakeGateway::new(Reply::Panic);
        let use_case = FetchResponsesUseCase::new(gateway, &online());

        let result = use_case.fetch(&query("q")).await;
        assert_eq!(result.source, ResponseSource::ConnectionFailed);
        assert_eq!(result.responses, connection_failed_responses());
    }

    #[test]
    fn test_response_source_serialization() {
        assert_eq!(
            serde_json::to_string(&ResponseSource::Locked).unwrap(),
            r#"{"kind":"locked"}"#
        );
        assert_eq!(
            serde_json::to_string(&ResponseSource::Decoded(DecodeTier::Cleanup)).unwrap(),
            r#"{"kind":"decoded","tier":"cleanup"}"#
        );
    }
}

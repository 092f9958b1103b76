//! Translate Code use case
//!
//! Runs the translation pipeline: validate the request, compose the prompt,
//! call the completion service, and parse the reply.

use crate::config::RetryPolicy;
use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::progress::{NoProgress, TranslationProgressNotifier, TranslationStage};
use polyglot_domain::{
    CompletionOutcome, ComposedPrompt, DomainError, ParseFailure, ParsedTranslation,
    ResponseParser, TranslationPromptTemplate, TranslationRequest,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Every way a translation can end other than a [`ParsedTranslation`].
///
/// Error kinds are never coalesced: the boundary layer maps each variant to
/// its own status.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// The caller sent a malformed request; nothing was sent upstream
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// The completion service rejected the request or could not be reached
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The reply did not follow the response protocol; carries the raw text
    #[error(transparent)]
    Protocol(#[from] ParseFailure),

    /// Something failed inside the service itself; the detail is for logs only
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranslateError {
    /// Message suitable for an `{error: ...}` envelope. Upstream messages
    /// are passed through as reported; internal details are withheld.
    pub fn user_message(&self) -> String {
        match self {
            TranslateError::Upstream { message, .. } => message.clone(),
            TranslateError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Validation(_) => "validation_error",
            TranslateError::Upstream { .. } => "upstream_error",
            TranslateError::Protocol(_) => "protocol_error",
            TranslateError::Internal(_) => "internal_error",
        }
    }
}

/// Use case for translating a snippet between languages
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct TranslateCodeUseCase {
    gateway: Arc<dyn CompletionGateway>,
    retry: RetryPolicy,
}

impl TranslateCodeUseCase {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            gateway,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Validate an untyped inbound record, then translate it.
    pub async fn execute_value(&self, input: &Value) -> Result<ParsedTranslation, TranslateError> {
        self.execute_value_with_progress(input, &NoProgress).await
    }

    pub async fn execute_value_with_progress(
        &self,
        input: &Value,
        progress: &dyn TranslationProgressNotifier,
    ) -> Result<ParsedTranslation, TranslateError> {
        progress.on_stage(TranslationStage::Validating);
        let request = TranslationRequest::from_value(input).inspect_err(|e| {
            debug!(field = e.field().unwrap_or("body"), error = %e, "Rejected translation request");
            progress.on_finished(false);
        })?;
        self.execute_with_progress(&request, progress).await
    }

    /// Translate an already-validated request.
    pub async fn execute(
        &self,
        request: &TranslationRequest,
    ) -> Result<ParsedTranslation, TranslateError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Translate an already-validated request with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        request: &TranslationRequest,
        progress: &dyn TranslationProgressNotifier,
    ) -> Result<ParsedTranslation, TranslateError> {
        info!(
            source_language = %request.source_language(),
            target_language = %request.target_language(),
            code_bytes = request.source_code().len(),
            "Starting translation"
        );

        progress.on_stage(TranslationStage::Composing);
        let prompt = TranslationPromptTemplate::compose(request);
        debug!(prompt_bytes = prompt.len(), "Composed translation prompt");

        let result = self.complete_with_retry(request, &prompt, progress).await;
        let result = match result {
            Ok(raw) => {
                progress.on_stage(TranslationStage::Parsing);
                ResponseParser::new().parse(&raw).map_err(|failure| {
                    warn!(
                        violation = %failure.violation,
                        reply_bytes = raw.len(),
                        reply_preview = %failure.preview(80),
                        "Completion reply did not follow the response protocol"
                    );
                    TranslateError::Protocol(failure)
                })
            }
            Err(e) => Err(e),
        };

        progress.on_finished(result.is_ok());
        if let Ok(parsed) = &result {
            info!(
                synthesis_points = parsed.synthesis_points().len(),
                code_bytes = parsed.translated_code().len(),
                "Translation complete"
            );
        }
        result
    }

    async fn complete_with_retry(
        &self,
        request: &TranslationRequest,
        prompt: &ComposedPrompt,
        progress: &dyn TranslationProgressNotifier,
    ) -> Result<String, TranslateError> {
        let mut attempt = 1;

        loop {
            progress.on_stage(TranslationStage::AwaitingCompletion);
            let outcome = self.gateway.complete(prompt, request.credential()).await;

            match outcome {
                CompletionOutcome::Success(raw) => {
                    debug!(attempt, reply_bytes = raw.len(), "Completion succeeded");
                    return Ok(raw);
                }
                CompletionOutcome::Failure { status, ref message } => {
                    if outcome.is_retryable() && self.retry.allows_retry_after(attempt) {
                        let delay = self.retry.delay_after(attempt);
                        warn!(
                            attempt,
                            status,
                            delay_ms = delay.as_millis() as u64,
                            "Completion failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        progress.on_retry(attempt, status);
                        continue;
                    }

                    warn!(attempt, status, error = %message, "Completion failed");
                    return Err(TranslateError::Upstream {
                        status,
                        message: message.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use polyglot_domain::{Credential, Marker, ProtocolViolation};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockGateway {
        outcomes: Mutex<VecDeque<CompletionOutcome>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn new(outcomes: Vec<CompletionOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::from(outcomes)),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn complete(
            &self,
            prompt: &ComposedPrompt,
            _credential: &Credential,
        ) -> CompletionOutcome {
            self.prompts.lock().unwrap().push(prompt.as_str().to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| CompletionOutcome::failure(500, "No more outcomes"))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        stages: Mutex<Vec<TranslationStage>>,
        retries: Mutex<Vec<(u32, u16)>>,
        finished: Mutex<Option<bool>>,
    }

    impl TranslationProgressNotifier for RecordingProgress {
        fn on_stage(&self, stage: TranslationStage) {
            self.stages.lock().unwrap().push(stage);
        }

        fn on_retry(&self, attempt: u32, status: u16) {
            self.retries.lock().unwrap().push((attempt, status));
        }

        fn on_finished(&self, success: bool) {
            *self.finished.lock().unwrap() = Some(success);
        }
    }

    const HASKELL_REPLY: &str = "✨ TRANSLATED CODE (Haskell):\n\n\
        ```haskell\ndata X = X\n```\n\n\
        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n\
        🧠 SYNTHESIS POINTS:\n\n\
        ✓ Classes: JavaScript class → Haskell algebraic data type\n\
        Rationale: Both name a shape of data.\n\n\
        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n\
        💡 KEY INSIGHT:\n\nAn empty class is just a nominal type.\n\n\
        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n\
        ⚖️ TRADE-OFFS:\n\n\
        GAINED: Immutability.\nLOST: Methods on the value.\nMITIGATION: Module-level functions.\n";

    fn haskell_request() -> Value {
        json!({
            "credential": "sk-secret-credential",
            "sourceLanguage": "JavaScript",
            "targetLanguage": "Haskell",
            "sourceCode": "class X {}"
        })
    }

    fn use_case(gateway: Arc<MockGateway>) -> TranslateCodeUseCase {
        TranslateCodeUseCase::new(gateway)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_end_to_end_javascript_to_haskell() {
        let outcomes = vec![CompletionOutcome::success(HASKELL_REPLY)];
        let gateway = Arc::new(MockGateway::new(outcomes));
        let parsed = use_case(gateway.clone())
            .execute_value(&haskell_request())
            .await
            .unwrap();

        assert_eq!(parsed.translated_code(), "data X = X");
        let tradeoffs = parsed.tradeoffs();
        assert!(tradeoffs.gained.as_deref().is_some_and(|s| !s.is_empty()));
        assert!(tradeoffs.lost.as_deref().is_some_and(|s| !s.is_empty()));
        assert!(tradeoffs.mitigation.as_deref().is_some_and(|s| !s.is_empty()));
        assert_eq!(parsed.synthesis_points().len(), 1);

        assert_eq!(gateway.calls(), 1);
        let prompt = gateway.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("class X {}"));
        assert!(!prompt.contains("sk-secret-credential"));
    }

    #[tokio::test]
    async fn test_validation_error_skips_gateway() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let input = json!({
            "credential": "",
            "sourceLanguage": "JS",
            "targetLanguage": "Go",
            "sourceCode": "x"
        });

        let error = use_case(gateway.clone()).execute_value(&input).await.unwrap_err();
        assert!(matches!(
            error,
            TranslateError::Validation(DomainError::EmptyField("credential"))
        ));
        assert_eq!(error.kind(), "validation_error");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_rate_limited_upstream_passes_through() {
        let gateway = Arc::new(MockGateway::new(vec![CompletionOutcome::failure(
            429,
            "rate limited",
        )]));

        let error = use_case(gateway.clone())
            .execute_value(&haskell_request())
            .await
            .unwrap_err();

        match &error {
            TranslateError::Upstream { status, message } => {
                assert_eq!(*status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(error.user_message(), "rate limited");
        assert!(!format!("{error:?}").contains("sk-secret-credential"));
        assert!(!error.to_string().contains("sk-secret-credential"));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_protocol_failure_carries_raw_text() {
        let reply = "Here is your code: data X = X";
        let gateway = Arc::new(MockGateway::new(vec![CompletionOutcome::success(reply)]));

        let error = use_case(gateway)
            .execute_value(&haskell_request())
            .await
            .unwrap_err();

        match error {
            TranslateError::Protocol(failure) => {
                assert_eq!(failure.raw_text, reply);
                assert_eq!(
                    failure.violation,
                    ProtocolViolation::MissingMarker(Marker::TranslatedCode)
                );
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let gateway = Arc::new(MockGateway::new(vec![
            CompletionOutcome::failure(503, "overloaded"),
            CompletionOutcome::success(HASKELL_REPLY),
        ]));

        let error = use_case(gateway.clone())
            .execute_value(&haskell_request())
            .await
            .unwrap_err();
        assert!(matches!(error, TranslateError::Upstream { status: 503, .. }));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_from_server_error() {
        let gateway = Arc::new(MockGateway::new(vec![
            CompletionOutcome::failure(529, "overloaded"),
            CompletionOutcome::failure(502, "connection reset"),
            CompletionOutcome::success(HASKELL_REPLY),
        ]));
        let progress = RecordingProgress::default();

        let parsed = use_case(gateway.clone())
            .with_retry_policy(RetryPolicy::default().with_max_attempts(3))
            .execute_value_with_progress(&haskell_request(), &progress)
            .await
            .unwrap();

        assert_eq!(parsed.translated_code(), "data X = X");
        assert_eq!(gateway.calls(), 3);
        assert_eq!(*progress.retries.lock().unwrap(), vec![(2, 529), (3, 502)]);
        assert_eq!(*progress.finished.lock().unwrap(), Some(true));

        // Every attempt sends the identical prompt
        let prompts = gateway.prompts.lock().unwrap();
        assert!(prompts.iter().all(|p| p == &prompts[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_stops_at_max_attempts() {
        let gateway = Arc::new(MockGateway::new(vec![
            CompletionOutcome::failure(429, "rate limited"),
            CompletionOutcome::failure(429, "still rate limited"),
            CompletionOutcome::success(HASKELL_REPLY),
        ]));

        let error = use_case(gateway.clone())
            .with_retry_policy(RetryPolicy::default().with_max_attempts(2))
            .execute_value(&haskell_request())
            .await
            .unwrap_err();

        assert_eq!(error.user_message(), "still rate limited");
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_are_not_retried() {
        let gateway = Arc::new(MockGateway::new(vec![CompletionOutcome::failure(
            401,
            "invalid x-api-key",
        )]));

        let error = use_case(gateway.clone())
            .with_retry_policy(RetryPolicy::default().with_max_attempts(5))
            .execute_value(&haskell_request())
            .await
            .unwrap_err();

        assert!(matches!(error, TranslateError::Upstream { status: 401, .. }));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_progress_stages_in_order() {
        let outcomes = vec![CompletionOutcome::success(HASKELL_REPLY)];
        let gateway = Arc::new(MockGateway::new(outcomes));
        let progress = RecordingProgress::default();

        use_case(gateway)
            .execute_value_with_progress(&haskell_request(), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.stages.lock().unwrap(),
            vec![
                TranslationStage::Validating,
                TranslationStage::Composing,
                TranslationStage::AwaitingCompletion,
                TranslationStage::Parsing,
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_nothing() {
        let gateway = Arc::new(MockGateway::new(vec![
            CompletionOutcome::success(HASKELL_REPLY),
            CompletionOutcome::success(HASKELL_REPLY),
        ]));
        let uc = use_case(gateway.clone());

        let a = TranslationRequest::new("key-a", "JavaScript", "Haskell", "class A {}").unwrap();
        let b = TranslationRequest::new("key-b", "Python", "Haskell", "class B: pass").unwrap();
        let (ra, rb) = tokio::join!(uc.execute(&a), uc.execute(&b));
        assert!(ra.is_ok());
        assert!(rb.is_ok());
        assert_eq!(gateway.calls(), 2);
    }

    #[test]
    fn test_internal_error_hides_detail_from_callers() {
        let error = TranslateError::Internal("index out of bounds".to_string());
        assert_eq!(error.user_message(), "Internal server error");
        assert_eq!(error.kind(), "internal_error");
        assert!(error.to_string().contains("index out of bounds"));
    }
}

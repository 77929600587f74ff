use std::sync::Arc;

use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use fortune_core::FallbackClassifier;
use fortune_core::model::PersonalityResult;

use super::transport::ClassificationTransport;
use crate::config::RetryPolicy;
use crate::error::TransportError;

/// Where a classification came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultSource {
    Remote,
    Fallback,
}

/// A personality result plus its provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub result: PersonalityResult,
    pub source: ResultSource,
    /// Remote attempts made before the result was produced.
    pub attempts: u32,
}

impl Classification {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::Fallback
    }
}

/// Obtains a classification for a completed answer sequence.
///
/// Transient failures are retried with a linear backoff. Once the attempt budget is
/// spent the offline classifier answers instead, so `classify` never fails.
#[derive(Clone)]
pub struct ClassificationClient {
    transport: Arc<dyn ClassificationTransport>,
    retry: RetryPolicy,
    fallback: FallbackClassifier,
}

impl ClassificationClient {
    #[must_use]
    pub fn new(transport: Arc<dyn ClassificationTransport>, retry: RetryPolicy) -> Self {
        Self {
            transport,
            retry,
            fallback: FallbackClassifier::builtin(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackClassifier) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    #[must_use]
    pub fn fallback(&self) -> &FallbackClassifier {
        &self.fallback
    }

    pub async fn classify(&self, answers: &[String]) -> Classification {
        let max_attempts = self.retry.max_attempts();

        for attempt in 1..=max_attempts {
            match self.attempt(answers).await {
                Ok(result) => {
                    info!(attempt, personality = %result.personality_type, "analysis service answered");
                    return Classification {
                        result,
                        source: ResultSource::Remote,
                        attempts: attempt,
                    };
                }
                Err(err) => {
                    warn!(attempt, max_attempts, error = %err, "analysis attempt failed");
                }
            }

            if attempt < max_attempts {
                sleep(self.retry.backoff_after(attempt)).await;
            }
        }

        let result = self.fallback.classify(answers);
        warn!(
            attempts = max_attempts,
            personality = %result.personality_type,
            "analysis service unavailable, using offline reading"
        );
        Classification {
            result,
            source: ResultSource::Fallback,
            attempts: max_attempts,
        }
    }

    async fn attempt(&self, answers: &[String]) -> Result<PersonalityResult, TransportError> {
        let limit = self.retry.attempt_timeout();
        match timeout(limit, self.transport.analyze(answers)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(TransportError::Timeout(limit)),
        }
    }
}

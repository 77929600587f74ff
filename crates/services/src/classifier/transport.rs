use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use fortune_core::model::{PersonalityResult, QuestionCatalog};

use crate::config::ClassifierConfig;
use crate::error::{CatalogLoadError, TransportError};

/// One round trip to the analysis service.
#[async_trait]
pub trait ClassificationTransport: Send + Sync {
    async fn analyze(&self, answers: &[String]) -> Result<PersonalityResult, TransportError>;
}

/// `reqwest` transport speaking the `/api/analyze` JSON protocol.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClassifierConfig,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `TransportError::Http` when the HTTP client cannot be built.
    pub fn new(config: ClassifierConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.retry.attempt_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Fetch the question catalog the service publishes at `/api/questions`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` for transport failures or an invalid catalog.
    pub async fn fetch_catalog(&self) -> Result<QuestionCatalog, CatalogLoadError> {
        let response = self
            .client
            .get(self.config.endpoint("api/questions"))
            .send()
            .await
            .map_err(|err| CatalogLoadError::Transport(classify_reqwest_error(err, &self.config)))?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status()).into());
        }

        let body = response
            .text()
            .await
            .map_err(|err| CatalogLoadError::Transport(err.into()))?;
        Ok(QuestionCatalog::from_json(&body)?)
    }
}

#[async_trait]
impl ClassificationTransport for HttpTransport {
    async fn analyze(&self, answers: &[String]) -> Result<PersonalityResult, TransportError> {
        let payload = AnalysisRequest { answers };
        let response = self
            .client
            .post(self.config.endpoint("api/analyze"))
            .json(&payload)
            .send()
            .await
            .map_err(|err| classify_reqwest_error(err, &self.config))?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status()));
        }

        Ok(response.json::<PersonalityResult>().await?)
    }
}

fn classify_reqwest_error(err: reqwest::Error, config: &ClassifierConfig) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(config.retry.attempt_timeout())
    } else {
        TransportError::Http(err)
    }
}

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    answers: &'a [String],
}

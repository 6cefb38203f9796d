use crate::models::{RecordId, SubscriptionDraft, SubscriptionRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid base url '{0}'")]
    BaseUrl(String),
}

/// The remote subscriptions API. It owns storage and assigns ids.
#[async_trait]
pub trait SubscriptionApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<SubscriptionRecord>, ApiError>;

    async fn create(&self, draft: &SubscriptionDraft) -> Result<(), ApiError>;

    async fn update(&self, record: &SubscriptionRecord) -> Result<(), ApiError>;

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError>;
}

pub struct HttpSubscriptionApi {
    http: Client,
    base_url: Url,
}

impl HttpSubscriptionApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim()).map_err(|_| ApiError::BaseUrl(raw.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(raw));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.url_with(&["subscriptions"])
    }

    /// Each segment is percent-encoded, so an id can never change the path shape.
    fn record_url(&self, id: &RecordId) -> Result<Url, ApiError> {
        self.url_with(&["subscriptions", id.as_str()])
    }

    fn url_with(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SubscriptionApi for HttpSubscriptionApi {
    async fn list(&self) -> Result<Vec<SubscriptionRecord>, ApiError> {
        let url = self.collection_url()?;
        debug!("GET {url}");
        let resp = check(self.http.get(url).send().await?).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Decode(format!("subscription list: {e}")))
    }

    async fn create(&self, draft: &SubscriptionDraft) -> Result<(), ApiError> {
        let url = self.collection_url()?;
        debug!("POST {url}");
        check(self.http.post(url).json(draft).send().await?).await?;
        Ok(())
    }

    async fn update(&self, record: &SubscriptionRecord) -> Result<(), ApiError> {
        let url = self.record_url(&record.id)?;
        debug!("PUT {url}");
        check(self.http.put(url).json(record).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        let url = self.record_url(id)?;
        debug!("DELETE {url}");
        check(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

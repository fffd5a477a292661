//! Remote feature store: the authoritative home of redline features.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, TransportError>` so callers can decide
//! what a failure costs them. The service layer deliberately logs and
//! continues (fire-and-forget, the baseline contract for this tool); a
//! hardened caller can retry off the same interface.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::config::StoreConfig;
use crate::feature::FeatureKind;
use crate::wire::{WireCollection, WireError, WireFeature};

/// Failures talking to the feature service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feature service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed feature in response: {0}")]
    Malformed(#[from] WireError),
    #[error("update requires a server id")]
    MissingId,
}

/// Response to a create call. The service may or may not return the
/// assigned id synchronously; when it does not, the id is learned from the
/// reconcile that follows.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct CreateResponse {
    pub id: Option<i64>,
}

/// One feature collection per kind, supporting create, update, and query.
#[allow(async_fn_in_trait)]
pub trait FeatureStore {
    /// Persist a new feature. The wire feature carries no id.
    async fn create(&self, kind: FeatureKind, feature: &WireFeature) -> Result<CreateResponse, TransportError>;

    /// Overwrite a persisted feature. The wire feature carries its id.
    async fn update(&self, kind: FeatureKind, feature: &WireFeature) -> Result<(), TransportError>;

    /// Fetch the current authoritative collection for a kind.
    async fn query(&self, kind: FeatureKind) -> Result<Vec<WireFeature>, TransportError>;
}

/// HTTP client for a hosted feature service.
///
/// Create is `POST {endpoint}`, update is `PUT {endpoint}/{id}`, query is
/// `GET {endpoint}` returning a feature collection.
pub struct HttpFeatureStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl HttpFeatureStore {
    /// Build a client from endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns a connection-setup error from the underlying HTTP client.
    pub fn new(config: StoreConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, kind: FeatureKind) -> &str {
        match kind {
            FeatureKind::Point => &self.config.point_url,
            FeatureKind::Line => &self.config.line_url,
        }
    }
}

impl FeatureStore for HttpFeatureStore {
    async fn create(&self, kind: FeatureKind, feature: &WireFeature) -> Result<CreateResponse, TransportError> {
        let resp = self.client.post(self.endpoint(kind)).json(feature).send().await?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status()));
        }
        // Services that respond with an empty body simply don't confirm the
        // id synchronously; the reconcile that follows learns it.
        Ok(resp.json::<CreateResponse>().await.unwrap_or_default())
    }

    async fn update(&self, kind: FeatureKind, feature: &WireFeature) -> Result<(), TransportError> {
        // An id-less update has no row to address; refuse it rather than
        // silently writing to `{endpoint}/0`.
        let Some(id) = feature.id else {
            return Err(TransportError::MissingId);
        };
        let url = format!("{}/{id}", self.endpoint(kind));
        let resp = self.client.put(url).json(feature).send().await?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status()));
        }
        Ok(())
    }

    async fn query(&self, kind: FeatureKind) -> Result<Vec<WireFeature>, TransportError> {
        let resp = self.client.get(self.endpoint(kind)).send().await?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status()));
        }
        let collection = resp.json::<WireCollection>().await?;
        Ok(collection.features)
    }
}

use async_trait::async_trait;
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::debug;
use url::Url;

use crate::error::{BoxError, DataPointError, Result};

/// Source of the DataPoint API key, asked again for every request so keys
/// can rotate without rebuilding the client.
pub trait ApiKeySupplier: Send + Sync {
    fn api_key(&self) -> String;
}

/// A key that never changes.
#[derive(Clone)]
pub struct StaticApiKey(String);

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticApiKey(..)")
    }
}

impl ApiKeySupplier for StaticApiKey {
    fn api_key(&self) -> String {
        self.0.clone()
    }
}

impl<F> ApiKeySupplier for F
where
    F: Fn() -> String + Send + Sync,
{
    fn api_key(&self) -> String {
        self()
    }
}

/// Why a GET did not produce a body.
#[derive(Debug)]
pub enum TransportFailure {
    /// No response was received.
    Request(BoxError),
    /// The response body could not be read.
    Body(BoxError),
}

/// Performs a single GET and returns the whole body, whatever the status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: Url) -> std::result::Result<Vec<u8>, TransportFailure>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn get(&self, url: Url) -> std::result::Result<Vec<u8>, TransportFailure> {
        let res = reqwest::Client::get(self, url)
            .send()
            .await
            .map_err(|e| TransportFailure::Request(Box::new(e)))?;

        // `bytes` consumes the response, so the connection is handed back on
        // both the success and the error path.
        let body = res
            .bytes()
            .await
            .map_err(|e| TransportFailure::Body(Box::new(e)))?;

        Ok(body.to_vec())
    }
}

/// Resolves endpoint paths against the base URI and runs authenticated GETs.
#[derive(Clone)]
pub(crate) struct Transport {
    base_uri: String,
    api_key: Arc<dyn ApiKeySupplier>,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_uri", &self.base_uri)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(
        base_uri: String,
        api_key: Arc<dyn ApiKeySupplier>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_uri,
            api_key,
            http,
        }
    }

    pub(crate) fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Joins `suffix` onto the base URI, treating the base as a directory.
    fn target(&self, suffix: &str) -> std::result::Result<Url, url::ParseError> {
        let mut base = Url::parse(&self.base_uri)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(suffix.trim_start_matches('/'))
    }

    /// Returns the raw body along with the target URL (without query string)
    /// for use in later error messages.
    pub(crate) async fn fetch(
        &self,
        description: &str,
        suffix: &str,
        query: &BTreeMap<&str, String>,
    ) -> Result<(Vec<u8>, String)> {
        let mut url = self.target(suffix).map_err(|source| DataPointError::Url {
            description: description.to_string(),
            url: match self.base_uri.as_str() {
                "" => "???".to_string(),
                base => base.to_string(),
            },
            source,
        })?;
        let target = url.to_string();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key.api_key());
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }

        debug!(%target, description, "querying DataPoint");

        let body = self.http.get(url).await.map_err(|failure| match failure {
            TransportFailure::Request(source) => DataPointError::Request {
                description: description.to_string(),
                url: target.clone(),
                source,
            },
            TransportFailure::Body(source) => DataPointError::Body {
                description: description.to_string(),
                url: target.clone(),
                source,
            },
        })?;

        Ok((body, target))
    }
}

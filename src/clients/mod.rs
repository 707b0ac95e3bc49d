/// Remote analysis service client
use crate::domain::{Analysis, City, NasaStatus};
use crate::errors::{FetchError, FetchResult};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// The remote analysis service as seen by the loaders.
///
/// `ApiClient` is the HTTP implementation; tests substitute scripted ones.
#[async_trait::async_trait]
pub trait RemoteService: Send + Sync {
    /// `GET /`. Succeeds on any 2xx.
    async fn probe(&self) -> FetchResult<()>;
    /// `GET /api/cities`
    async fn cities(&self) -> FetchResult<Vec<City>>;
    /// `GET /api/analyze/{city_id}`
    async fn analysis(&self, city_id: &str) -> FetchResult<Analysis>;
    /// `GET /api/nasa-status`
    async fn nasa_status(&self) -> FetchResult<NasaStatus>;
}

/// HTTP implementation of [`RemoteService`]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// `timeout` bounds every request end to end, body included.
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lp-guardian/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> FetchResult<Response> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Service {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> FetchResult<T> {
        let url = self.endpoint(segments)?;
        let bytes = self.get(url).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl RemoteService for ApiClient {
    async fn probe(&self) -> FetchResult<()> {
        self.get(self.base_url.clone()).await?;
        Ok(())
    }

    async fn cities(&self) -> FetchResult<Vec<City>> {
        self.get_json(&["api", "cities"]).await
    }

    /// Returns the payload as sent; `city_id` may be empty on older backends.
    async fn analysis(&self, city_id: &str) -> FetchResult<Analysis> {
        self.get_json(&["api", "analyze", city_id]).await
    }

    async fn nasa_status(&self) -> FetchResult<NasaStatus> {
        self.get_json(&["api", "nasa-status"]).await
    }
}

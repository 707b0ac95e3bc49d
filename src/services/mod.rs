/// Data loading services: remote first, bundled fallback second
use crate::clients::RemoteService;
use crate::connectivity::ConnectivitySignal;
use crate::domain::{Analysis, City, NasaStatus};
use crate::errors::{DashboardError, FetchError, FetchResult};
use crate::fallback::FallbackStore;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a loaded value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub origin: DataOrigin,
}

impl<T> Sourced<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            origin: DataOrigin::Remote,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            origin: DataOrigin::Fallback,
        }
    }
}

/// Try `remote` when the service is online; on any failure, or when offline,
/// use `fallback`. Remote errors are logged here and go no further.
pub async fn remote_with_fallback<T, Fut>(
    what: &str,
    online: bool,
    remote: impl FnOnce() -> Fut,
    fallback: impl FnOnce() -> Option<T>,
) -> Option<Sourced<T>>
where
    Fut: Future<Output = FetchResult<T>>,
{
    if online {
        match remote().await {
            Ok(value) => return Some(Sourced::remote(value)),
            Err(e) => warn!("Remote {} failed [{}]: {}", what, e.code(), e),
        }
    } else {
        debug!("Service offline, skipping remote {}", what);
    }

    let value = fallback();
    if value.is_some() {
        info!("Using bundled fallback for {}", what);
    }
    value.map(Sourced::fallback)
}

/// Loads the list of monitored cities
pub struct CatalogLoader {
    remote: Arc<dyn RemoteService>,
    signal: ConnectivitySignal,
    fallback: Arc<FallbackStore>,
}

impl CatalogLoader {
    pub fn new(
        remote: Arc<dyn RemoteService>,
        signal: ConnectivitySignal,
        fallback: Arc<FallbackStore>,
    ) -> Self {
        Self {
            remote,
            signal,
            fallback,
        }
    }

    /// Remote catalog, or the bundled one. Empty only when both are empty.
    pub async fn load_cities(&self) -> Sourced<Vec<City>> {
        let loaded = remote_with_fallback(
            "catalog",
            self.signal.is_online(),
            || async {
                let cities = self.remote.cities().await?;
                if cities.is_empty() {
                    return Err(FetchError::EmptyCatalog);
                }
                Ok::<_, FetchError>(cities)
            },
            || Some(self.fallback.cities().to_vec()).filter(|c| !c.is_empty()),
        )
        .await;

        match loaded {
            Some(cities) => {
                info!(
                    "Catalog loaded: {} cities ({:?})",
                    cities.value.len(),
                    cities.origin
                );
                cities
            }
            None => {
                warn!("No catalog available from service or bundled data");
                Sourced::fallback(Vec::new())
            }
        }
    }

    /// Upstream feed summary. Only available online; there is no fallback.
    pub async fn load_nasa_status(&self) -> Option<NasaStatus> {
        if !self.signal.is_online() {
            return None;
        }
        match self.remote.nasa_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("NASA status unavailable [{}]: {}", e.code(), e);
                None
            }
        }
    }
}

/// Loads the detailed analysis for one city
pub struct AnalysisFetcher {
    remote: Arc<dyn RemoteService>,
    signal: ConnectivitySignal,
    fallback: Arc<FallbackStore>,
}

impl AnalysisFetcher {
    pub fn new(
        remote: Arc<dyn RemoteService>,
        signal: ConnectivitySignal,
        fallback: Arc<FallbackStore>,
    ) -> Self {
        Self {
            remote,
            signal,
            fallback,
        }
    }

    pub async fn fetch_analysis(&self, city_id: &str) -> Result<Sourced<Analysis>, DashboardError> {
        let city_id = city_id.trim();
        if city_id.is_empty() {
            return Err(DashboardError::EmptySelection);
        }

        let loaded = remote_with_fallback(
            &format!("analysis for '{}'", city_id),
            self.signal.is_online(),
            || async {
                let mut analysis = self.remote.analysis(city_id).await?;
                if analysis.city_id.is_empty() {
                    analysis.city_id = city_id.to_string();
                }
                Ok::<_, FetchError>(analysis)
            },
            || self.fallback.analysis(city_id).cloned(),
        )
        .await;

        loaded.ok_or_else(|| DashboardError::DataUnavailable {
            city_id: city_id.to_string(),
        })
    }
}

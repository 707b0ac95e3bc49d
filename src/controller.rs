/// Dashboard view state and the async driver behind it
//
// `ViewModel` is the synchronous state machine; `Dashboard` drives it with the
// loaders and never holds the model lock across an `.await`.
//
// Every selection bumps a generation counter and hands out a `FetchTicket`.
// A fetch result is committed only if its ticket is still the latest one, so
// a slow response for a superseded city never overwrites the city now
// selected. Catalog loads carry their own counter in `CatalogTicket`.
use crate::clients::RemoteService;
use crate::config::AppConfig;
use crate::connectivity::{Connectivity, ConnectivitySignal};
use crate::domain::{Analysis, City, NasaStatus};
use crate::errors::DashboardError;
use crate::fallback::FallbackStore;
use crate::monitor::AvailabilityMonitor;
use crate::services::{AnalysisFetcher, CatalogLoader, DataOrigin, Sourced};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingPhase {
    Catalog,
    Analysis { city_id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading(LoadingPhase),
    Loaded,
    /// No cities from the service or the bundled data. Left only by retry.
    Empty,
    /// The last fetch failed; any previous analysis is still shown.
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading(_))
    }
}

/// The analysis currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAnalysis {
    pub analysis: Analysis,
    pub origin: DataOrigin,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    city_id: String,
}

impl FetchTicket {
    pub fn city_id(&self) -> &str {
        &self.city_id
    }
}

/// Issued by `begin_catalog`. Remembers the selection generation at the time
/// so a user pick made while the catalog loads is not overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTicket {
    catalog_generation: u64,
    selection_generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// Superseded by a newer request; nothing changed.
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    state: ViewState,
    cities: Vec<City>,
    catalog_origin: Option<DataOrigin>,
    selection: Option<String>,
    current: Option<CurrentAnalysis>,
    nasa_status: Option<NasaStatus>,
    generation: u64,
    catalog_generation: u64,
}

impl ViewModel {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn catalog_origin(&self) -> Option<DataOrigin> {
        self.catalog_origin
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn current(&self) -> Option<&CurrentAnalysis> {
        self.current.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.current.as_ref().map(|c| &c.analysis)
    }

    pub fn nasa_status(&self) -> Option<&NasaStatus> {
        self.nasa_status.as_ref()
    }

    pub fn selected_city(&self) -> Option<&City> {
        let id = self.selection.as_deref()?;
        self.cities.iter().find(|c| c.id == id)
    }

    /// Enter catalog loading. Invalidates any analysis request in flight.
    pub fn begin_catalog(&mut self) -> CatalogTicket {
        self.generation += 1;
        self.catalog_generation += 1;
        self.state = ViewState::Loading(LoadingPhase::Catalog);
        CatalogTicket {
            catalog_generation: self.catalog_generation,
            selection_generation: self.generation,
        }
    }

    /// Install a catalog and pick the city to load first: the previous
    /// selection if still listed, else `preferred`, else the first city.
    ///
    /// Returns `None` when the catalog was superseded by a newer load, when
    /// it is empty (entering `Empty`), or when a city was selected while it
    /// loaded. In the last case the catalog is still installed.
    pub fn commit_catalog(
        &mut self,
        ticket: CatalogTicket,
        cities: Sourced<Vec<City>>,
        nasa_status: Option<NasaStatus>,
        preferred: &str,
    ) -> Option<String> {
        if ticket.catalog_generation != self.catalog_generation {
            debug!("Discarding superseded catalog result");
            return None;
        }

        self.cities = cities.value;
        self.catalog_origin = Some(cities.origin);
        if nasa_status.is_some() {
            self.nasa_status = nasa_status;
        }

        if self.cities.is_empty() {
            self.state = ViewState::Empty;
            return None;
        }

        if ticket.selection_generation != self.generation {
            debug!("City selected during catalog load, skipping auto-select");
            return None;
        }

        let listed = |id: &str| self.cities.iter().any(|c| c.id == id);
        let next = match self.selection.as_deref() {
            Some(prev) if listed(prev) => prev.to_string(),
            _ if listed(preferred) => preferred.to_string(),
            _ => self.cities[0].id.clone(),
        };
        Some(next)
    }

    /// Select a city and enter `Loading`. An empty id changes nothing.
    pub fn select(&mut self, city_id: &str) -> Result<FetchTicket, DashboardError> {
        let city_id = city_id.trim();
        if city_id.is_empty() {
            return Err(DashboardError::EmptySelection);
        }
        if self.state == ViewState::Empty {
            return Err(DashboardError::DataUnavailable {
                city_id: city_id.to_string(),
            });
        }

        self.generation += 1;
        self.selection = Some(city_id.to_string());
        self.state = ViewState::Loading(LoadingPhase::Analysis {
            city_id: city_id.to_string(),
        });
        Ok(FetchTicket {
            generation: self.generation,
            city_id: city_id.to_string(),
        })
    }

    /// Resolve the `Loading` state opened by `ticket`, unless it was superseded.
    pub fn commit_analysis(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Sourced<Analysis>, DashboardError>,
    ) -> Commit {
        if ticket.generation != self.generation
            || self.selection.as_deref() != Some(ticket.city_id.as_str())
        {
            debug!(
                "Discarding stale analysis for '{}' (generation {} < {})",
                ticket.city_id, ticket.generation, self.generation
            );
            return Commit::Discarded;
        }

        match result {
            Ok(loaded) => {
                self.current = Some(CurrentAnalysis {
                    analysis: loaded.value,
                    origin: loaded.origin,
                    fetched_at: Utc::now(),
                });
                self.state = ViewState::Loaded;
            }
            Err(e) => {
                self.state = ViewState::Error(e.to_string());
            }
        }
        Commit::Applied
    }
}

/// Dashboard behaviour switches taken from `AppConfig`
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub default_city: String,
    pub reprobe_before_fetch: bool,
}

impl From<&AppConfig> for DashboardOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_city: config.default_city.clone(),
            reprobe_before_fetch: config.reprobe_before_fetch,
        }
    }
}

pub struct Dashboard {
    model: Mutex<ViewModel>,
    monitor: AvailabilityMonitor,
    signal: ConnectivitySignal,
    catalog: CatalogLoader,
    fetcher: AnalysisFetcher,
    options: DashboardOptions,
}

impl Dashboard {
    pub fn new(
        remote: Arc<dyn RemoteService>,
        fallback: FallbackStore,
        config: &AppConfig,
    ) -> Self {
        let (monitor, signal) = AvailabilityMonitor::new(remote.clone(), config.timeouts.probe);
        let fallback = Arc::new(fallback);
        Self {
            model: Mutex::new(ViewModel::default()),
            catalog: CatalogLoader::new(remote.clone(), signal.clone(), fallback.clone()),
            fetcher: AnalysisFetcher::new(remote, signal.clone(), fallback),
            monitor,
            signal,
            options: DashboardOptions::from(config),
        }
    }

    fn model(&self) -> MutexGuard<'_, ViewModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current view model
    pub fn snapshot(&self) -> ViewModel {
        self.model().clone()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.signal.current()
    }

    /// Probe, load the catalog, then load the first city's analysis.
    pub async fn start(&self) -> ViewState {
        let ticket = self.model().begin_catalog();

        let online = self.monitor.probe().await;
        let cities = self.catalog.load_cities().await;
        let nasa_status = if online {
            self.catalog.load_nasa_status().await
        } else {
            None
        };

        let first = self.model().commit_catalog(
            ticket,
            cities,
            nasa_status,
            &self.options.default_city,
        );

        if let Some(city_id) = first {
            info!("Auto-selecting '{}'", city_id);
            if let Err(e) = self.select_city(&city_id).await {
                warn!("Initial selection failed: {}", e);
            }
        }
        self.model().state().clone()
    }

    /// Manual retry; the only way out of `Empty`.
    pub async fn retry(&self) -> ViewState {
        info!("Retrying dashboard load");
        self.start().await
    }

    /// Select `city_id` and load its analysis.
    ///
    /// An empty id is rejected without any state change or network call.
    /// Returns whether the result was committed or dropped as stale.
    pub async fn select_city(&self, city_id: &str) -> Result<Commit, DashboardError> {
        let ticket = self.model().select(city_id)?;

        if self.options.reprobe_before_fetch {
            self.monitor.probe().await;
        }

        let result = self.fetcher.fetch_analysis(ticket.city_id()).await;
        if let Err(e) = &result {
            warn!("Analysis for '{}' unavailable: {}", ticket.city_id(), e);
        }

        Ok(self.model().commit_analysis(&ticket, result))
    }
}

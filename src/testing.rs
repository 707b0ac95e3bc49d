/// Scripted in-memory `RemoteService` for unit tests

use crate::clients::RemoteService;
use crate::domain::{Analysis, City, NasaStatus, Status};
use crate::errors::{FetchError, FetchResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct ScriptedRemote {
    reachable: AtomicBool,
    probe_delay: Duration,
    cities: Mutex<Option<Vec<City>>>,
    analyses: Mutex<HashMap<String, (Analysis, Duration)>>,
    nasa_status: Option<NasaStatus>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRemote {
    pub fn online() -> Self {
        Self {
            reachable: AtomicBool::new(true),
            probe_delay: Duration::ZERO,
            cities: Mutex::new(None),
            analyses: Mutex::new(HashMap::new()),
            nasa_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        let remote = Self::online();
        remote.set_reachable(false);
        remote
    }

    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    pub fn with_cities(self, cities: Vec<City>) -> Self {
        *self.cities.lock().unwrap() = Some(cities);
        self
    }

    pub fn with_analysis(self, analysis: Analysis, delay: Duration) -> Self {
        let city_id = analysis.city_id.clone();
        self.with_analysis_for(&city_id, analysis, delay)
    }

    /// Serve `analysis` for `city_id` regardless of the id in the payload.
    pub fn with_analysis_for(self, city_id: &str, analysis: Analysis, delay: Duration) -> Self {
        self.analyses
            .lock()
            .unwrap()
            .insert(city_id.to_string(), (analysis, delay));
        self
    }

    pub fn with_nasa_status(mut self, status: NasaStatus) -> Self {
        self.nasa_status = Some(status);
        self
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Requests received so far, excluding probes.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> FetchResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FetchError::Network("connection refused".to_string()))
        }
    }
}

#[async_trait::async_trait]
impl RemoteService for ScriptedRemote {
    async fn probe(&self) -> FetchResult<()> {
        tokio::time::sleep(self.probe_delay).await;
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FetchError::Network("connection refused".to_string()))
        }
    }

    async fn cities(&self) -> FetchResult<Vec<City>> {
        self.record("cities".to_string())?;
        let cities = self.cities.lock().unwrap().clone();
        cities.ok_or(FetchError::Service { status: 500 })
    }

    async fn analysis(&self, city_id: &str) -> FetchResult<Analysis> {
        self.record(format!("analyze/{}", city_id))?;
        let entry = self.analyses.lock().unwrap().get(city_id).cloned();
        match entry {
            Some((analysis, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(analysis)
            }
            None => Err(FetchError::Service { status: 404 }),
        }
    }

    async fn nasa_status(&self) -> FetchResult<NasaStatus> {
        self.record("nasa-status".to_string())?;
        self.nasa_status
            .clone()
            .ok_or(FetchError::Service { status: 503 })
    }
}

pub fn city(id: &str, status: &str, score: u8) -> City {
    City {
        id: id.to_string(),
        name: id.to_string(),
        status: Status::from(status),
        health_score: score,
        nasa_events_count: Some(0),
    }
}

pub fn analysis(id: &str, status: &str, score: u8) -> Analysis {
    Analysis {
        city_id: id.to_string(),
        name: format!("{} (remote)", id),
        description: String::new(),
        region: None,
        population: None,
        status: Status::from(status),
        health_score: score,
        blue_ratio: 0.6,
        orange_ratio: 0.4,
        history: Vec::new(),
        recommendations: vec!["Use warm lighting".to_string()],
        data_sources: ["NASA EONET".to_string()].into_iter().collect(),
        nasa_events: None,
        earth_imagery: None,
        nighttime_data: None,
        asteroids_data: None,
        image_url: String::new(),
        last_updated: "2024-05-01 12:00:00".to_string(),
    }
}

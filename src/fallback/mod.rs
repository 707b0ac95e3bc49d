/// Bundled offline catalog used when the analysis service is unreachable
use crate::domain::{Analysis, City};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

const BUNDLED: &str = include_str!("../../data/fallback.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FallbackStore {
    cities: Vec<City>,
    #[serde(default)]
    analyses: HashMap<String, Analysis>,
}

impl FallbackStore {
    /// Parse a store from its JSON form; analyses are keyed by city id.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut store: FallbackStore = serde_json::from_str(raw)?;
        for (id, analysis) in store.analyses.iter_mut() {
            if analysis.city_id.is_empty() {
                analysis.city_id = id.clone();
            }
        }
        Ok(store)
    }

    /// The catalog shipped with the binary. An unreadable bundle yields an
    /// empty store, which drives the dashboard into its `Empty` state.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED) {
            Ok(store) => {
                debug!(
                    "Loaded bundled fallback data ({} cities, {} analyses)",
                    store.cities.len(),
                    store.analyses.len()
                );
                store
            }
            Err(e) => {
                error!("Bundled fallback data is malformed: {}", e);
                Self::default()
            }
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn analysis(&self, city_id: &str) -> Option<&Analysis> {
        self.analyses.get(city_id)
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

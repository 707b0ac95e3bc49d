/// Headless dashboard session: load the catalog and the selected analyses
use lp_guardian::controller::ViewModel;
use lp_guardian::{ApiClient, AppConfig, Dashboard, FallbackStore, ViewState};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Using analysis service at {}", config.api_base_url);

    let client = ApiClient::new(&config.api_base_url, config.timeouts.request)?;
    let dashboard = Dashboard::new(Arc::new(client), FallbackStore::bundled(), &config);

    let state = dashboard.start().await;
    if state == ViewState::Empty {
        error!("No cities available from the service or bundled data");
        return Ok(());
    }
    report(&dashboard.snapshot());

    for city_id in std::env::args().skip(1) {
        match dashboard.select_city(&city_id).await {
            Ok(_) => report(&dashboard.snapshot()),
            Err(e) => warn!("Skipping '{}': {}", city_id, e),
        }
    }

    Ok(())
}

fn report(view: &ViewModel) {
    if let Some(status) = view.nasa_status() {
        info!(
            "NASA feeds: {} operational, {} active events, {} asteroids today",
            status.data_sources_operational.len(),
            status.active_events,
            status.asteroids_today
        );
    }

    for city in view.cities() {
        info!(
            "  {:<12} {:<10} [{}] score {:>3} {}",
            city.short_name(),
            city.status,
            city.severity().as_str(),
            city.health_score,
            city.health_band().hex()
        );
    }

    if let ViewState::Error(message) = view.state() {
        warn!("{}", message);
    }

    if let Some(current) = view.current() {
        let a = &current.analysis;
        info!(
            "{} ({:?}): {} [{}], health {} {}, blue {:.1}% / orange {:.1}%, updated {}",
            a.name,
            current.origin,
            a.status,
            a.severity().label(),
            a.health_score,
            a.health_band().hex(),
            a.blue_ratio * 100.0,
            a.orange_ratio * 100.0,
            a.last_updated
        );
        for event in a.nasa_events() {
            info!("  event: {} ({}, {})", event.title, event.category, event.date);
        }
        for rec in &a.recommendations {
            info!("  - {}", rec);
        }
    }
}

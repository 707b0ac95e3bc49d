/// Availability probing for the remote analysis service

use crate::clients::RemoteService;
use crate::connectivity::{self, ConnectivityPublisher, ConnectivitySignal};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct AvailabilityMonitor {
    remote: Arc<dyn RemoteService>,
    publisher: ConnectivityPublisher,
    timeout: Duration,
}

impl AvailabilityMonitor {
    /// Build a monitor together with the read half of its signal.
    pub fn new(remote: Arc<dyn RemoteService>, timeout: Duration) -> (Self, ConnectivitySignal) {
        let (publisher, signal) = connectivity::channel();
        (
            Self {
                remote,
                publisher,
                timeout,
            },
            signal,
        )
    }

    /// Probe the service root. Never fails: errors and timeouts are
    /// reported as `false` and published to the signal.
    pub async fn probe(&self) -> bool {
        let online = match tokio::time::timeout(self.timeout, self.remote.probe()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Service probe failed [{}]: {}", e.code(), e);
                false
            }
            Err(_) => {
                warn!("Service probe timed out after {:?}", self.timeout);
                false
            }
        };
        self.publisher.publish(online);
        info!(
            "Analysis service is {}",
            if online { "online" } else { "offline" }
        );
        online
    }
}

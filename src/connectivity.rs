/// Process-wide "is the analysis service reachable" signal
//
// One writer: the `ConnectivityPublisher` owned by the availability monitor.
// Loaders hold a `ConnectivitySignal`, which can read but not change the value.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// No probe has completed yet. Treated as offline.
    Unknown,
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(self) -> bool {
        matches!(self, Connectivity::Online)
    }
}

/// Write half. Not `Clone`.
#[derive(Debug)]
pub struct ConnectivityPublisher {
    tx: watch::Sender<Connectivity>,
}

impl ConnectivityPublisher {
    pub fn publish(&self, online: bool) {
        let next = if online {
            Connectivity::Online
        } else {
            Connectivity::Offline
        };
        self.tx.send_replace(next);
    }

    pub fn subscribe(&self) -> ConnectivitySignal {
        ConnectivitySignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read half, handed to every loader.
#[derive(Debug, Clone)]
pub struct ConnectivitySignal {
    rx: watch::Receiver<Connectivity>,
}

impl ConnectivitySignal {
    pub fn current(&self) -> Connectivity {
        *self.rx.borrow()
    }

    pub fn is_online(&self) -> bool {
        self.current().is_online()
    }
}

/// Create the signal in its initial `Unknown` state.
pub fn channel() -> (ConnectivityPublisher, ConnectivitySignal) {
    let (tx, rx) = watch::channel(Connectivity::Unknown);
    (ConnectivityPublisher { tx }, ConnectivitySignal { rx })
}

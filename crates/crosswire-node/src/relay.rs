//! # Relay
//!
//! Forwards raw wire strings onto the bus and logs what subscribers receive.

use crosswire_bus::{ChannelFilter, InMemoryBus};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Bridges an external line-oriented source onto the bus.
pub struct Relay {
    bus: Arc<InMemoryBus>,
}

impl Relay {
    /// Relay publishing on `bus`.
    pub fn new(bus: Arc<InMemoryBus>) -> Self {
        Self { bus }
    }

    /// Relay with a private bus of default capacity.
    pub fn standalone() -> Self {
        Self::new(Arc::new(InMemoryBus::new()))
    }

    pub fn bus(&self) -> &Arc<InMemoryBus> {
        &self.bus
    }

    /// Publish one line as a raw wire string. Trailing `\r`/`\n` are stripped;
    /// blank lines are skipped.
    ///
    /// Returns the number of subscribers the line reached.
    pub fn forward(&self, line: &str) -> usize {
        let raw = line.trim_end_matches(['\r', '\n']);
        if raw.is_empty() {
            debug!("Skipping blank line");
            return 0;
        }
        self.bus.publish_raw(raw)
    }

    /// Subscribe now and log every valid envelope until the bus closes.
    ///
    /// The task resolves to the number of envelopes received.
    pub fn spawn_listener(&self, filter: ChannelFilter) -> JoinHandle<u64> {
        let mut subscription = self.bus.subscribe(filter);
        tokio::spawn(async move {
            let mut received = 0u64;
            while let Some(envelope) = subscription.recv().await {
                received += 1;
                info!(
                    channel = envelope.channel(),
                    message = envelope.message(),
                    "Envelope received"
                );
            }
            debug!(received, "Listener finished");
            received
        })
    }
}

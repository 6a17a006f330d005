//! # Publisher
//!
//! Defines the publishing side of the bus.

use crate::config::{BusConfig, ConfigError};
use crate::filter::ChannelFilter;
use crate::subscriber::{EnvelopeStream, Subscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use crosswire_envelope::{Envelope, DELIMITER};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing envelopes to the bus.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish an envelope.
    ///
    /// # Returns
    ///
    /// The number of active subscribers the encoded envelope was handed to.
    async fn publish(&self, envelope: &Envelope) -> usize;

    /// Get the total number of messages published.
    fn messages_published(&self) -> u64;
}

/// In-memory bus moving encoded envelopes.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Only wire strings travel through the channel, exactly as they
/// would across a process boundary; subscribers decode on receipt.
pub struct InMemoryBus {
    /// Broadcast sender for wire strings.
    sender: broadcast::Sender<String>,

    /// Active subscription count by filter key.
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,

    /// Total messages published.
    messages_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,

    warn_on_delimited_channel: bool,
}

impl InMemoryBus {
    /// Create a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new bus with specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or larger than `usize::MAX / 2`. Use [`InMemoryBus::from_config`] to get
    /// an error instead.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            messages_published: AtomicU64::new(0),
            capacity,
            warn_on_delimited_channel: true,
        }
    }

    /// Create a bus from validated configuration.
    pub fn from_config(config: &BusConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut bus = Self::with_capacity(config.capacity);
        bus.warn_on_delimited_channel = config.warn_on_delimited_channel;
        Ok(bus)
    }

    /// Publish a raw wire string as received from elsewhere.
    ///
    /// The string is not inspected; subscribers discard it if it does not
    /// decode to a valid envelope.
    pub fn publish_raw(&self, raw: &str) -> usize {
        // Always increment counter (message was attempted)
        self.messages_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(raw.to_owned()) {
            Ok(receiver_count) => {
                debug!(bytes = raw.len(), receivers = receiver_count, "Message published");
                receiver_count
            }
            Err(e) => {
                // No receivers - message is dropped
                warn!(bytes = raw.len(), error = %e, "Message dropped (no receivers)");
                0
            }
        }
    }

    /// Subscribe to envelopes matching a filter.
    ///
    /// Returns a `Subscription` handle that can be used to receive envelopes.
    #[must_use]
    pub fn subscribe(&self, filter: ChannelFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        let filter_key = filter.key();

        // Track subscription
        {
            if let Ok(mut subs) = self.subscriptions.write() {
                *subs.entry(filter_key.clone()).or_insert(0) += 1;
            }
        }

        debug!(channels = ?filter.channels, "New subscription created");

        Subscription::new(receiver, filter, self.subscriptions.clone(), filter_key)
    }

    /// Get a stream of envelopes matching a filter.
    #[must_use]
    pub fn envelope_stream(&self, filter: ChannelFilter) -> EnvelopeStream {
        EnvelopeStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Number of live subscriptions created with an equivalent filter.
    #[must_use]
    pub fn subscriptions_for(&self, filter: &ChannelFilter) -> usize {
        self.subscriptions
            .read()
            .ok()
            .and_then(|subs| subs.get(&filter.key()).copied())
            .unwrap_or(0)
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for InMemoryBus {
    async fn publish(&self, envelope: &Envelope) -> usize {
        if self.warn_on_delimited_channel && envelope.channel().contains(DELIMITER) {
            warn!(
                channel = envelope.channel(),
                "Channel contains the wire delimiter and will be split on decode"
            );
        }
        if !envelope.is_valid() {
            debug!(channel = envelope.channel(), "Publishing invalid envelope");
        }

        self.publish_raw(&envelope.to_wire())
    }

    fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }
}

impl Subscriber for InMemoryBus {
    fn subscribe(&self, filter: ChannelFilter) -> Subscription {
        InMemoryBus::subscribe(self, filter)
    }
}

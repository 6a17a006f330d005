//! # Subscriber
//!
//! Defines the subscription side of the bus. Wire strings are decoded here;
//! anything that does not decode to a valid envelope is discarded.

use crate::filter::ChannelFilter;
use crosswire_envelope::Envelope;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was closed.
    #[error("Bus closed")]
    Closed,
}

/// Trait for subscribing to envelopes from the bus.
pub trait Subscriber: Send + Sync {
    /// Subscribe to envelopes matching a filter.
    fn subscribe(&self, filter: ChannelFilter) -> Subscription;
}

/// Decode a wire string and apply the filter.
fn admit(filter: &ChannelFilter, raw: &str) -> Option<Envelope> {
    let envelope = Envelope::decode(raw);
    if !envelope.is_valid() {
        debug!(bytes = raw.len(), "Discarding invalid envelope");
        return None;
    }
    filter.matches(&envelope).then_some(envelope)
}

/// Decrements the bus's subscription count when dropped.
struct SubscriptionTracker {
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,
    filter_key: String,
}

impl Drop for SubscriptionTracker {
    fn drop(&mut self) {
        let Ok(mut subs) = self.subscriptions.write() else {
            return;
        };
        let Some(count) = subs.get_mut(&self.filter_key) else {
            debug!(filter = %self.filter_key, "Subscription dropped");
            return;
        };

        *count = count.saturating_sub(1);
        if *count == 0 {
            subs.remove(&self.filter_key);
        }
        debug!(filter = %self.filter_key, "Subscription dropped");
    }
}

/// A subscription handle for receiving envelopes.
///
/// When dropped, the subscription is automatically cleaned up.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<String>,

    /// Filter for this subscription.
    filter: ChannelFilter,

    tracker: SubscriptionTracker,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<String>,
        filter: ChannelFilter,
        subscriptions: Arc<RwLock<HashMap<String, usize>>>,
        filter_key: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            tracker: SubscriptionTracker {
                subscriptions,
                filter_key,
            },
        }
    }

    /// Receive the next valid envelope that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(envelope)` - The next matching envelope
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<Envelope> {
        loop {
            let raw = match self.receiver.recv().await {
                Ok(raw) => raw,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some messages dropped");
                    continue;
                }
            };

            if let Some(envelope) = admit(&self.filter, &raw) {
                return Some(envelope);
            }
        }
    }

    /// Try to receive the next envelope without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(envelope))` - An envelope was available and matched
    /// - `Ok(None)` - Nothing available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<Envelope>, SubscriptionError> {
        loop {
            let raw = match self.receiver.try_recv() {
                Ok(raw) => raw,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if let Some(envelope) = admit(&self.filter, &raw) {
                return Ok(Some(envelope));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn channel_filter(&self) -> &ChannelFilter {
        &self.filter
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct EnvelopeStream {
    inner: BroadcastStream<String>,
    filter: ChannelFilter,
    _tracker: SubscriptionTracker,
}

impl EnvelopeStream {
    /// Create a new envelope stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let Subscription {
            receiver,
            filter,
            tracker,
        } = subscription;
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
            _tracker: tracker,
        }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn channel_filter(&self) -> &ChannelFilter {
        &self.filter
    }
}

impl Stream for EnvelopeStream {
    type Item = Envelope;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                None => return Poll::Ready(None),
                Some(Err(BroadcastStreamRecvError::Lagged(count))) => {
                    debug!(lagged = count, "Stream lagged, some messages dropped");
                }
                Some(Ok(raw)) => {
                    if let Some(envelope) = admit(&this.filter, &raw) {
                        return Poll::Ready(Some(envelope));
                    }
                }
            }
        }
    }
}

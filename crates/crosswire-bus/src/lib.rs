//! # Crosswire Bus - Envelope Transport
//!
//! In-process publish/subscribe transport for [`Envelope`]s. Publishers hand
//! envelopes to the bus, which moves them as encoded wire strings; each
//! subscriber decodes, discards anything invalid, and applies its channel
//! filter.
//!
//! ```text
//! ┌──────────────┐  publish()   ┌──────────────┐  subscribe()  ┌──────────────┐
//! │  Producer    │ ───────────▶ │     Bus      │ ────────────▶ │  Consumer    │
//! │ Envelope ──▶ │  "chan:msg"  │ (broadcast)  │  "chan:msg"   │ ──▶ Envelope │
//! └──────────────┘              └──────────────┘               └──────────────┘
//! ```
//!
//! ## Guarantees
//!
//! None beyond best effort: no authentication, no ordering across
//! publishers, no delivery to subscribers that lag past the channel
//! capacity or subscribe after publication.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod filter;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use config::{BusConfig, ConfigError};
pub use crosswire_envelope::Envelope;
pub use filter::ChannelFilter;
pub use publisher::{InMemoryBus, Publisher};
pub use subscriber::{EnvelopeStream, Subscriber, Subscription, SubscriptionError};

/// Maximum messages to buffer per subscriber before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Largest capacity [`BusConfig::validate`] accepts. The broadcast ring is
/// allocated up front.
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}

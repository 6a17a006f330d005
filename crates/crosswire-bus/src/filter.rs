//! # Channel Filters
//!
//! Subscription-side selection of envelopes by channel name.

use crosswire_envelope::Envelope;

/// Filter for subscribing to specific channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    /// Channels to include. Empty means every channel.
    pub channels: Vec<String>,
}

impl ChannelFilter {
    /// Create a filter that accepts every channel.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific channels.
    #[must_use]
    pub fn channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a filter for a single channel.
    #[must_use]
    pub fn channel(channel: impl Into<String>) -> Self {
        Self {
            channels: vec![channel.into()],
        }
    }

    /// Check if an envelope's channel passes this filter.
    #[must_use]
    pub fn matches(&self, envelope: &Envelope) -> bool {
        self.channels.is_empty() || self.channels.iter().any(|c| c == envelope.channel())
    }

    /// Stable key used to count subscriptions per filter.
    pub(crate) fn key(&self) -> String {
        if self.channels.is_empty() {
            return "*".to_string();
        }
        let mut channels = self.channels.clone();
        channels.sort();
        channels.join(",")
    }
}

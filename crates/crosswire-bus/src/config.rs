//! Bus configuration from environment variables.

use crate::{DEFAULT_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A broadcast channel cannot hold zero messages.
    #[error("Bus capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Bus capacity {capacity} exceeds the maximum of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },
}

/// Configuration for [`InMemoryBus`](crate::InMemoryBus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Messages buffered per subscriber before the slowest one lags.
    pub capacity: usize,

    /// Log a warning when a publisher uses a channel containing the wire
    /// delimiter (such channels do not survive decoding).
    pub warn_on_delimited_channel: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
            warn_on_delimited_channel: true,
        }
    }
}

impl BusConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CROSSWIRE_BUS_CAPACITY`: Channel capacity (default: 1000)
    /// - `CROSSWIRE_WARN_DELIMITED_CHANNEL`: Warn on `:` in channels (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            capacity: env::var("CROSSWIRE_BUS_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),

            warn_on_delimited_channel: env::var("CROSSWIRE_WARN_DELIMITED_CHANNEL")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.warn_on_delimited_channel),
        }
    }

    /// Builder-style method to set the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reject values the bus cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > MAX_CHANNEL_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: MAX_CHANNEL_CAPACITY,
            });
        }
        Ok(())
    }
}

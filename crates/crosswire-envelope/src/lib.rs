//! # Crosswire Envelope
//!
//! The data unit passed between process or isolation boundaries. An envelope
//! travels as a single delimited string carrying the channel name and the
//! message payload.
//!
//! ## Wire Format
//!
//! ```text
//! <channel>:<message>
//! ```
//!
//! - UTF-8 text, no length prefix, no escaping.
//! - Decoding splits at the **first** colon only, so messages may contain
//!   colons and round-trip intact.
//! - A channel containing a colon does NOT round-trip: everything after its
//!   first colon is attributed to the message.
//!
//! ## Validity
//!
//! Malformed input never raises. It decodes to an invalid envelope and the
//! receiver is expected to check [`Envelope::is_valid`] before acting on it.
//!
//! ```
//! use crosswire_envelope::Envelope;
//!
//! let envelope = Envelope::decode("prices:EURUSD:1.0841");
//! assert!(envelope.is_valid());
//! assert_eq!(envelope.channel(), "prices");
//! assert_eq!(envelope.message(), "EURUSD:1.0841");
//!
//! assert!(!Envelope::decode("no delimiter here").is_valid());
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod envelope;

pub use envelope::{encode, Envelope};

/// Separator between the channel and the message on the wire.
pub const DELIMITER: char = ':';

//! # Envelope
//!
//! Channel/message pair and its single-string wire encoding.

use crate::DELIMITER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encode a channel and message into the wire form `<channel>:<message>`.
///
/// Neither field is escaped. A channel containing the delimiter will not
/// decode back to the same channel.
#[must_use]
pub fn encode(channel: &str, message: &str) -> String {
    let mut wire = String::with_capacity(channel.len() + message.len() + 1);
    wire.push_str(channel);
    wire.push(DELIMITER);
    wire.push_str(message);
    wire
}

/// A message addressed to a channel.
///
/// Both fields are fixed at construction. Serializes as its wire string, so an
/// envelope embedded in a JSON document reads `"channel:message"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Envelope {
    channel: String,
    message: String,
}

impl Envelope {
    /// Create an envelope for sending `message` on `channel`.
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// The empty envelope. Never valid.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild an envelope from a raw wire string.
    ///
    /// Returns the empty envelope when `raw` is empty or has no delimiter.
    /// Otherwise splits once, at the first delimiter.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        match raw.split_once(DELIMITER) {
            Some((channel, message)) => Self::new(channel, message),
            None => Self::empty(),
        }
    }

    /// Decode input from a transport that may deliver nothing at all.
    #[must_use]
    pub fn decode_opt(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::empty, Self::decode)
    }

    /// Decode raw transport bytes. Bytes that are not UTF-8 yield the empty
    /// envelope.
    #[must_use]
    pub fn decode_bytes(raw: &[u8]) -> Self {
        std::str::from_utf8(raw).map_or_else(|_| Self::empty(), Self::decode)
    }

    /// The channel name.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// The message payload.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True iff both the channel and the message are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.channel.is_empty() && !self.message.is_empty()
    }

    /// The wire form. Same as [`encode`] and the `Display` output.
    #[must_use]
    pub fn to_wire(&self) -> String {
        encode(&self.channel, &self.message)
    }

    /// Split into `(channel, message)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.channel, self.message)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.channel, DELIMITER, self.message)
    }
}

impl From<Envelope> for String {
    fn from(envelope: Envelope) -> Self {
        envelope.to_wire()
    }
}

impl From<String> for Envelope {
    fn from(raw: String) -> Self {
        Self::decode(&raw)
    }
}

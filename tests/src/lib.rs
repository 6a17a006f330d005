//! # Crosswire Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── transport.rs    # Envelopes across the bus boundary
//!     └── resolution.rs   # Container + activator dependency chains
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p crosswire-tests
//! cargo test -p crosswire-tests integration::resolution::
//! ```

#![allow(dead_code)]

pub mod integration;

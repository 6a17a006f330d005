//! # Crosswire Node
//!
//! Library half of the `crosswire-node` binary, exposed for testing.
//!
//! ## Startup Sequence
//!
//! 1. Load telemetry and bus configuration from the environment
//! 2. Initialize logging
//! 3. Build the container (bus instance + relay type binding)
//! 4. Resolve the relay through the activator
//! 5. Forward stdin lines as raw wire strings until EOF
//! 6. Drop the bus and wait for the listener to drain

pub mod relay;
pub mod wiring;

pub use relay::Relay;
pub use wiring::build_container;

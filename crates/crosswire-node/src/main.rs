//! # Crosswire Node
//!
//! Reads `<channel>:<message>` lines from stdin, publishes them on an
//! in-memory bus and logs every valid envelope a wildcard subscriber
//! receives. Malformed lines are dropped by the subscriber.

use anyhow::{Context, Result};
use crosswire_bus::{BusConfig, ChannelFilter, InMemoryBus, Publisher};
use crosswire_node::{build_container, Relay};
use crosswire_telemetry::{init_logging, TelemetryConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::for_component("node");
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let bus_config = BusConfig::from_env();
    let container = build_container(&bus_config).context("Invalid bus configuration")?;
    let relay = container
        .resolve::<Relay>()
        .context("Failed to resolve relay")?;

    let listener = relay.spawn_listener(ChannelFilter::all());
    info!("Relaying stdin onto the bus");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        relay.forward(&line);
    }

    let published = container
        .resolve::<InMemoryBus>()
        .context("Failed to resolve bus")?
        .messages_published();

    // Last bus handles go here; the listener sees the channel close.
    drop(relay);
    drop(container);

    let received = listener.await.context("Listener task failed")?;
    info!(published, received, "Shutdown complete");
    Ok(())
}

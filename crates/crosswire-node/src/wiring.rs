//! Container wiring for the node process.

use crate::relay::Relay;
use crosswire_bus::{BusConfig, ConfigError, InMemoryBus};
use crosswire_ioc::{Container, TypeDescriptor};
use std::sync::Arc;
use tracing::info;

/// Build the node's container.
///
/// Binds one shared [`InMemoryBus`] built from the validated [`BusConfig`]
/// and [`Relay`] as a described type. The relay prefers the shared bus;
/// its parameterless constructor only runs if no bus is bound.
pub fn build_container(bus_config: &BusConfig) -> Result<Container, ConfigError> {
    let bus = InMemoryBus::from_config(bus_config)?;

    let container = Container::new();
    container.register_shared(Arc::new(bus));
    container.register_type(relay_descriptor());

    info!(
        bindings = container.len(),
        capacity = bus_config.capacity,
        "Container wired"
    );
    Ok(container)
}

/// Constructors the activator may pick for [`Relay`].
pub fn relay_descriptor() -> TypeDescriptor {
    TypeDescriptor::of::<Relay>()
        .constructor0(Relay::standalone)
        .constructor1(Relay::new)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosswire_bus::Publisher;
    use crosswire_ioc::Activator;

    #[test]
    fn test_relay_uses_shared_bus() {
        let container = build_container(&BusConfig::default()).unwrap();
        let bus = container.resolve::<InMemoryBus>().unwrap();
        let relay = container.resolve::<Relay>().unwrap();

        assert!(Arc::ptr_eq(relay.bus(), &bus));
    }

    #[test]
    fn test_only_resolvable_bindings() {
        let container = build_container(&BusConfig::default()).unwrap();

        assert_eq!(container.len(), 2);
        assert!(container.is_registered::<InMemoryBus>());
        assert!(container.is_registered::<Relay>());
        assert!(!container.is_registered::<BusConfig>());
    }

    #[test]
    fn test_bound_bus_counts_relayed_lines() {
        let container = build_container(&BusConfig::default()).unwrap();
        let relay = container.resolve::<Relay>().unwrap();

        relay.forward("prices:1.0");
        relay.forward("garbage");

        let bus = container.resolve::<InMemoryBus>().unwrap();
        assert_eq!(bus.messages_published(), 2);
    }

    #[test]
    fn test_relay_without_bus_builds_its_own() {
        let container = Container::new();
        let relay = Activator::new(&container)
            .create::<Relay>(&relay_descriptor())
            .unwrap();

        assert_eq!(relay.bus().subscriber_count(), 0);
        assert!(!container.is_registered::<InMemoryBus>());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = build_container(&BusConfig::default().with_capacity(0));
        assert!(matches!(result, Err(ConfigError::ZeroCapacity)));

        let result = build_container(&BusConfig::default().with_capacity(usize::MAX));
        assert!(matches!(result, Err(ConfigError::CapacityTooLarge { .. })));
    }
}

//! # Dependency Resolution
//!
//! The container and activator building real components, including a bus
//! listener wired entirely through type bindings.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use crosswire_bus::{ChannelFilter, InMemoryBus, Publisher, Subscription};
    use crosswire_envelope::Envelope;
    use crosswire_ioc::{Activator, Container, ResolveError, TypeDescriptor, TypeKey};

    // =============================================================================
    // CONSTRUCTOR SELECTION
    // =============================================================================

    struct A;
    struct B;

    #[derive(Debug, PartialEq, Eq)]
    enum Ctor {
        Empty,
        WithA,
        WithAB,
    }

    struct Widget {
        ctor: Ctor,
    }

    fn widget_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Widget>()
            .constructor1(|_: Arc<A>| Widget { ctor: Ctor::WithA })
            .constructor2(|_: Arc<A>, _: Arc<B>| Widget { ctor: Ctor::WithAB })
            .constructor0(|| Widget { ctor: Ctor::Empty })
            .build()
    }

    #[test]
    fn test_selects_single_registered_dependency() {
        let container = Container::new();
        container.register_instance(A);
        container.register_type(widget_descriptor());

        let widget = container.resolve::<Widget>().unwrap();
        assert_eq!(widget.ctor, Ctor::WithA);
    }

    #[test]
    fn test_selection_tracks_registry_contents() {
        let container = Container::new();
        let activator = Activator::new(&container);
        let descriptor = widget_descriptor();

        assert_eq!(activator.select_constructor(&descriptor).unwrap().arity(), 0);

        container.register_instance(A);
        assert_eq!(activator.select_constructor(&descriptor).unwrap().arity(), 1);

        container.register_instance(B);
        assert_eq!(
            activator.select_constructor(&descriptor).unwrap().params(),
            &[TypeKey::of::<A>()]
        );
    }

    #[test]
    fn test_unsatisfiable_type_yields_no_instance() {
        let container = Container::new();
        container.register_instance(B);
        container.register_type(
            TypeDescriptor::of::<Widget>()
                .constructor1(|_: Arc<A>| Widget { ctor: Ctor::WithA })
                .constructor2(|_: Arc<A>, _: Arc<B>| Widget { ctor: Ctor::WithAB })
                .build(),
        );

        let result = container.resolve::<Widget>();
        assert!(matches!(
            result,
            Err(ResolveError::NoEligibleConstructor { constructors: 2, .. })
        ));
    }

    // =============================================================================
    // DEPENDENCY CHAINS
    // =============================================================================

    /// Channel a listener should watch.
    struct ChannelName(String);

    /// Subscribes on construction; depth 2 below `Inbox`.
    struct Listener {
        subscription: tokio::sync::Mutex<Subscription>,
    }

    /// Depth 3: owns a listener.
    struct Inbox {
        listener: Arc<Listener>,
    }

    fn listener_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Listener>()
            .constructor2(|bus: Arc<InMemoryBus>, channel: Arc<ChannelName>| Listener {
                subscription: tokio::sync::Mutex::new(
                    bus.subscribe(ChannelFilter::channel(channel.0.clone())),
                ),
            })
            .build()
    }

    fn inbox_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Inbox>()
            .constructor1(|listener: Arc<Listener>| Inbox { listener })
            .build()
    }

    #[tokio::test]
    async fn test_chain_wires_listener_to_shared_bus() {
        let bus = Arc::new(InMemoryBus::new());
        let container = Container::new();
        container.register_shared(bus.clone());
        container.register_instance(ChannelName("orders".to_string()));
        container.register_type(listener_descriptor());
        container.register_type(inbox_descriptor());

        let inbox = container.resolve::<Inbox>().unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&Envelope::new("orders", "id=7;qty=2")).await;

        let mut subscription = inbox.listener.subscription.lock().await;
        let received = timeout(Duration::from_millis(100), subscription.recv())
            .await
            .expect("timeout")
            .expect("envelope");
        assert_eq!(received.message(), "id=7;qty=2");
    }

    #[test]
    fn test_broken_link_aborts_before_outer_construction() {
        let outer_builds = Arc::new(AtomicUsize::new(0));
        let counter = outer_builds.clone();

        let container = Container::new();
        container.register_shared(Arc::new(InMemoryBus::new()));
        // ChannelName missing: Listener has no eligible constructor.
        container.register_type(listener_descriptor());
        container.register_type(
            TypeDescriptor::of::<Inbox>()
                .constructor1(move |listener: Arc<Listener>| {
                    counter.fetch_add(1, Ordering::Relaxed);
                    Inbox { listener }
                })
                .build(),
        );

        let result = container.resolve::<Inbox>();
        assert_eq!(
            result.err(),
            Some(ResolveError::NoEligibleConstructor {
                type_name: TypeKey::of::<Listener>().name(),
                constructors: 1,
            })
        );
        assert_eq!(outer_builds.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_factory_failure_propagates_unchanged() {
        let container = Container::new();
        container.register_factory::<ChannelName, _>(|_| {
            Err(ResolveError::construction::<ChannelName>("no channel configured"))
        });
        container.register_shared(Arc::new(InMemoryBus::new()));
        container.register_type(listener_descriptor());
        container.register_type(inbox_descriptor());

        let result = container.resolve::<Inbox>();
        assert_eq!(
            result.err(),
            Some(ResolveError::construction::<ChannelName>(
                "no channel configured"
            ))
        );
    }
}

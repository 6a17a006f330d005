//! # Envelope Transport
//!
//! Producer builds an envelope, the bus carries only its wire string, the
//! consumer decodes and checks validity.

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::timeout;

    use crosswire_bus::{ChannelFilter, InMemoryBus, Publisher};
    use crosswire_envelope::{encode, Envelope};
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    #[tokio::test]
    async fn test_message_with_colons_crosses_intact() {
        let bus = InMemoryBus::new();
        let mut consumer = bus.subscribe(ChannelFilter::channel("quotes"));

        bus.publish(&Envelope::new("quotes", "EUR:USD:1.0841")).await;

        let received = timeout(Duration::from_millis(100), consumer.recv())
            .await
            .expect("timeout")
            .expect("envelope");
        assert!(received.is_valid());
        assert_eq!(received.message(), "EUR:USD:1.0841");
    }

    #[tokio::test]
    async fn test_delimited_channel_lands_on_prefix() {
        let bus = InMemoryBus::new();
        let mut exact = bus.subscribe(ChannelFilter::channel("ns:quotes"));
        let mut prefix = bus.subscribe(ChannelFilter::channel("ns"));

        bus.publish(&Envelope::new("ns:quotes", "1.0")).await;

        let received = timeout(Duration::from_millis(100), prefix.recv())
            .await
            .expect("timeout")
            .expect("envelope");
        assert_eq!(received.channel(), "ns");
        assert_eq!(received.message(), "quotes:1.0");
        assert!(matches!(exact.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_consumer_only_sees_valid_envelopes() {
        let bus = InMemoryBus::new();
        let mut consumer = bus.subscribe(ChannelFilter::all());

        for raw in ["", "nodelimiter", "chan:", ":orphan", "alerts:cpu"] {
            bus.publish_raw(raw);
        }

        let received = timeout(Duration::from_millis(100), consumer.recv())
            .await
            .expect("timeout")
            .expect("envelope");
        assert_eq!(received, Envelope::new("alerts", "cpu"));
        assert!(matches!(consumer.try_recv(), Ok(None)));
        assert_eq!(bus.messages_published(), 5);
    }

    #[tokio::test]
    async fn test_fan_out_to_every_matching_subscriber() {
        let bus = InMemoryBus::new();
        let mut first = bus.subscribe(ChannelFilter::channel("jobs"));
        let mut second = bus.subscribe(ChannelFilter::channels(["jobs", "alerts"]));
        let mut unrelated = bus.subscribe(ChannelFilter::channel("alerts"));

        let receivers = bus.publish(&Envelope::new("jobs", "build#12")).await;
        assert_eq!(receivers, 3);

        for sub in [&mut first, &mut second] {
            let env = sub.try_recv().expect("open").expect("envelope");
            assert_eq!(env.message(), "build#12");
        }
        assert!(matches!(unrelated.try_recv(), Ok(None)));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Notice {
        envelope: Envelope,
        priority: u8,
    }

    #[test]
    fn test_envelope_inside_json_document() {
        let notice = Notice {
            envelope: Envelope::new("alerts", "disk:95%"),
            priority: 2,
        };

        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["envelope"], "alerts:disk:95%");

        let back: Notice = serde_json::from_value(json).unwrap();
        assert_eq!(back, notice);
    }

    proptest! {
        #[test]
        fn property_wire_round_trip_through_bus(
            channel in "[a-z][a-z0-9._-]{0,15}",
            message in "[ -~]{1,48}",
        ) {
            let bus = InMemoryBus::new();
            let mut consumer = bus.subscribe(ChannelFilter::all());

            bus.publish_raw(&encode(&channel, &message));

            let received = consumer.try_recv().expect("open").expect("envelope");
            prop_assert_eq!(received.channel(), channel.as_str());
            prop_assert_eq!(received.message(), message.as_str());
        }

        #[test]
        fn property_arbitrary_input_never_yields_invalid(raw in ".{0,40}") {
            let bus = InMemoryBus::new();
            let mut consumer = bus.subscribe(ChannelFilter::all());

            bus.publish_raw(&raw);

            match consumer.try_recv().expect("open") {
                Some(envelope) => {
                    prop_assert!(envelope.is_valid());
                    prop_assert_eq!(envelope.to_wire(), raw);
                }
                None => prop_assert!(!Envelope::decode(&raw).is_valid()),
            }
        }
    }
}

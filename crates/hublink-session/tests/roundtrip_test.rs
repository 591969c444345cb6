//! Loopback round-trip: commands written by the manager are answered by a
//! synthetic hub and decode back into the matching notifications.
//!
//! The "hub" here is a pure function over the frames the mock central
//! recorded: a property subscription is answered with a property update, a
//! port input format setup with a sensor value. This closes the loop
//! encode → radio write → notify → decode without any radio.

mod common;

use common::*;
use hublink_core::{HubProperty, PortId};
use hublink_protocol::{
    Command, HubPropertiesCommand, MotorStartPowerCommand, Notification, PropertyOperation,
};
use hublink_session::{CentralEvent, HubEvent, ManagerConfig};

/// Synthesize the hub's reply to one written command frame, if the
/// command solicits one.
fn loopback_reply(frame: &[u8]) -> Option<Vec<u8>> {
    match frame {
        // Hub properties command: answer with an update for the same
        // property. Payload picked per property.
        [0x05, 0x00, 0x01, property, operation] => {
            let solicits = *operation == 0x02 || *operation == 0x05;
            if !solicits {
                return None;
            }
            let value: &[u8] = match HubProperty::from_raw(*property) {
                HubProperty::AdvertisingName => b"LoopHub",
                HubProperty::FirmwareVersion => &[0x17, 0x00, 0x00, 0x20],
                HubProperty::BatteryVoltage => &[0x64],
                _ => &[0x00],
            };
            let mut reply = vec![0x00, 0x00, 0x01, *property, 0x06];
            reply.extend_from_slice(value);
            reply[0] = reply.len() as u8;
            Some(reply)
        }
        // Port input format setup with notifications enabled: answer with
        // a first sensor value for that port.
        [0x0A, 0x00, 0x41, port, _mode, _, _, _, _, 0x01] => Some(sensor_frame(*port, &[0x2A])),
        _ => None,
    }
}

#[tokio::test]
async fn test_bring_up_commands_round_trip_to_property_updates() {
    let (manager, handle, mut events) = manager_with_mock(ManagerConfig::default());
    let id = connect_hub(&manager, 0x40).await;

    // Kick off the bring-up with a first notification.
    manager
        .handle_event(CentralEvent::ValueUpdated {
            id,
            value: property_frame(0x02, &[0x01]),
        })
        .await;
    drain_events(&mut events);

    // Feed every written frame through the loopback hub.
    let replies: Vec<Vec<u8>> = handle
        .writes_to(id)
        .iter()
        .filter_map(|frame| loopback_reply(frame))
        .collect();
    assert_eq!(replies.len(), 3);
    for reply in replies {
        manager
            .handle_event(CentralEvent::ValueUpdated { id, value: reply })
            .await;
    }

    // The replies decode into the properties the bring-up asked for, and
    // land in the display cache.
    let properties: Vec<HubProperty> = drain_events(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            HubEvent::Notification {
                notification: Notification::HubProperty { property, .. },
                ..
            } => Some(property),
            _ => None,
        })
        .collect();
    assert_eq!(
        properties,
        vec![
            HubProperty::AdvertisingName,
            HubProperty::FirmwareVersion,
            HubProperty::BatteryVoltage,
        ]
    );

    let snapshot = manager.hub_snapshot(id).await.unwrap();
    assert_eq!(snapshot.advertising_name.as_deref(), Some("LoopHub"));
    assert_eq!(snapshot.firmware_version.as_deref(), Some("2.0.00.0017"));
    assert_eq!(snapshot.battery_percent, Some(100));
}

#[tokio::test]
async fn test_subscribe_round_trips_to_sensor_value() {
    let (manager, handle, _events) = manager_with_mock(ManagerConfig::default());
    let id = connect_hub(&manager, 0x40).await;

    // Settle bring-up, then attach a sensor. The dispatcher writes a
    // subscribe; the loopback hub answers with a reading.
    manager
        .handle_event(CentralEvent::ValueUpdated {
            id,
            value: property_frame(0x06, &[0x54]),
        })
        .await;
    handle.take_calls();

    manager
        .handle_event(CentralEvent::ValueUpdated {
            id,
            value: attached_frame(0x02, 0x0025),
        })
        .await;
    let replies: Vec<Vec<u8>> = handle
        .writes_to(id)
        .iter()
        .filter_map(|frame| loopback_reply(frame))
        .collect();
    assert_eq!(replies.len(), 1);

    manager
        .handle_event(CentralEvent::ValueUpdated {
            id,
            value: replies[0].clone(),
        })
        .await;

    let snapshot = manager.hub_snapshot(id).await.unwrap();
    assert_eq!(
        snapshot.sensor_value(PortId::new(0x02)).map(|v| &v[..]),
        Some(&[0x2A][..])
    );
}

#[tokio::test]
async fn test_typed_send_matches_manual_encoding() {
    let (manager, handle, _events) = manager_with_mock(ManagerConfig::default());
    let id = connect_hub(&manager, 0x40).await;
    handle.take_calls();

    let motor = MotorStartPowerCommand::new(PortId::new(0x00), 75);
    manager.send(id, &motor).await;

    let subscribe = HubPropertiesCommand::new(
        HubProperty::BatteryVoltage,
        PropertyOperation::EnableUpdates,
    );
    manager.send(id, &subscribe).await;

    assert_eq!(
        handle.writes_to(id),
        vec![motor.encode().to_vec(), subscribe.encode().to_vec()]
    );
}

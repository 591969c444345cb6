//! Notification dispatch: model mutation and follow-up command derivation.
//!
//! For each decoded notification this module mutates the hub model and
//! derives the commands the manager must write back: a sensor subscribe
//! when a peripheral attaches, an unsubscribe when it detaches, and the
//! one-shot bring-up sequence after the first notification of a session.

use crate::session::HubSession;
use bytes::Bytes;
use hublink_protocol::{
    Command, HubPropertiesCommand, Notification, PortInputFormatSetupCommand,
};

/// Apply `notification` to `session` and return the encoded follow-up
/// commands, in issue order.
///
/// The bring-up sequence is appended when the session's `initializing`
/// flag is still set: it fires on the first notification received after
/// connection, whatever that notification's own type, and never again for
/// the session's lifetime.
pub(crate) fn dispatch(session: &mut HubSession, notification: &Notification) -> Vec<Bytes> {
    let mut follow_ups = Vec::new();

    match notification {
        Notification::Attached { port, io_type } => {
            follow_ups.push(PortInputFormatSetupCommand::subscribe(*port, *io_type).encode());
        }
        Notification::Detached { port } => {
            follow_ups.push(PortInputFormatSetupCommand::unsubscribe(*port).encode());
        }
        Notification::SensorValue { .. } | Notification::HubProperty { .. } => {}
    }

    session.apply(notification);

    if session.initializing {
        session.initializing = false;
        for command in HubPropertiesCommand::bring_up_sequence() {
            follow_ups.push(command.encode());
        }
    }

    follow_ups
}

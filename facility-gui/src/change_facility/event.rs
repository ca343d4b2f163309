use crossbeam::channel;
use tracing::warn;

use crate::account::NewAccount;

/// Events the account form sends to the flow controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Back,
    Continue(NewAccount),
}

/// Capability of delivering an [`Event`] to the flow controller. Delivery is fire and forget.
pub trait EventSender {
    fn send(&self, event: Event);
}

impl EventSender for channel::Sender<Event> {
    fn send(&self, event: Event) {
        if let Err(channel::SendError(event)) = channel::Sender::send(self, event) {
            warn!("Flow controller is gone, dropping event {:?}", event);
        }
    }
}

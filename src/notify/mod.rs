//! Notification collaborator boundary.
//!
//! The workflow service hands a `DomainEvent` to the notifier after the
//! transition has been persisted. Implementations must swallow their own
//! failures; a lost notification never fails the operation.

use tracing::info;

use crate::model::event::DomainEvent;

pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, event: DomainEvent);
}

impl<N: Notifier> Notifier for std::sync::Arc<N> {
    fn notify(&self, event: DomainEvent) {
        self.as_ref().notify(event);
    }
}

/// Default notifier: logs the event and nothing more. The email sender
/// of the surrounding application subscribes the same way.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: DomainEvent) {
        info!(event = ?event, "domain event");
    }
}

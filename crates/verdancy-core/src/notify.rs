use crate::care::NotificationRequest;

/// Delivery collaborator for alert notifications (toast, email, push).
///
/// Dispatch is fire-and-forget from the care engine's perspective: a
/// failed delivery is recorded in the operation outcome but never rolls
/// back committed plant state.
pub trait Notifier: Send + Sync {
    /// Deliver one notification request.
    fn send(&self, request: &NotificationRequest) -> Result<(), Box<dyn std::error::Error>>;
}

/// Notifier that drops every request. Useful for embedders that only
/// consume the returned events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&self, _request: &NotificationRequest) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

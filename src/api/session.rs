/// Callback fired when the session cannot be recovered (refresh failed).
///
/// The hosting application decides what "go back to login" means; the client
/// only guarantees that the token pair is already cleared when this fires.
pub trait SessionExpiredNotifier: Send + Sync {
    fn session_expired(&self);
}

impl<F> SessionExpiredNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self()
    }
}

/// Notifier that does nothing; the caller still receives `ApiError::SessionExpired`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreSessionExpiry;

impl SessionExpiredNotifier for IgnoreSessionExpiry {
    fn session_expired(&self) {}
}

//! Always-on auxiliary service

/// Auxiliary service kept alive while connected (e.g. a cloud session)
///
/// The controller only drives this opportunistically from the `Connected`
/// state; it never depends on the session for its own transitions.
pub trait CloudSession {
    /// Check if the session is established
    fn is_linked(&self) -> bool;

    /// Start establishing the session
    fn link(&mut self);

    /// Periodic housekeeping for an established session
    fn pump(&mut self);

    /// Request a wall-clock time synchronization
    fn sync_clock(&mut self);
}

/// Session placeholder for devices without an auxiliary service
///
/// Reports itself as linked so the controller only ever calls `pump` and
/// `sync_clock`, both of which do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSession;

impl CloudSession for NoSession {
    fn is_linked(&self) -> bool {
        true
    }

    fn link(&mut self) {}

    fn pump(&mut self) {}

    fn sync_clock(&mut self) {}
}

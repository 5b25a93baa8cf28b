//! Radio mode and connection control

/// Options for a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectOptions {
    /// Do not let the radio fall back into broadcast mode on its own if the
    /// attempt fails; the controller manages that mode itself
    pub skip_auto_broadcast: bool,
}

/// Radio mode/readiness provider
///
/// Status queries take `&self`; anything that changes the radio's mode or
/// starts work takes `&mut self`.
pub trait Radio {
    /// Power the radio module on
    fn power_on(&mut self);

    /// Check if the radio has a usable IP-layer connection to an
    /// infrastructure network
    fn is_network_ready(&self) -> bool;

    /// Check if the radio is in local broadcast (direct/listen) mode
    fn is_broadcast_mode_active(&self) -> bool;

    /// Enter broadcast mode
    ///
    /// Calling this while already in broadcast mode must be harmless.
    fn enter_broadcast_mode(&mut self);

    /// Leave broadcast mode
    fn exit_broadcast_mode(&mut self);

    /// Check if a connection attempt is currently running
    fn is_connect_attempt_in_progress(&self) -> bool;

    /// Start connecting to the stored networks
    fn request_connect(&mut self, options: ConnectOptions);
}

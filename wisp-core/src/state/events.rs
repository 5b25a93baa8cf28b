//! Events that trigger state transitions

use super::machine::ConnectivityState;

/// Reasons the controller can change state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Radio reports a usable infrastructure connection
    NetworkReady,
    /// Radio was put into broadcast mode from outside the controller
    BroadcastModeForced,
    /// Radio lost its infrastructure connection
    ConnectionLost,
    /// Nothing stored to connect to
    NoCredentials,
    /// A stored network is visible with acceptable signal
    StoredNetworkFound,
    /// No usable stored network within the check timeout
    CheckTimedOut,
    /// Connection attempt exceeded its timeout
    ConnectTimedOut,
    /// Time in direct mode exceeded the dwell timeout
    DirectDwellElapsed,
}

impl Event {
    /// Check if this event reports a failure to reach a network
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::ConnectionLost | Event::CheckTimedOut | Event::ConnectTimedOut
        )
    }
}

/// A state change produced by one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State before the evaluation
    pub from: ConnectivityState,
    /// State after the evaluation
    pub to: ConnectivityState,
    /// Event that caused the change
    pub event: Event,
    /// Clock reading when the new state was entered (ms)
    pub at_ms: u32,
}

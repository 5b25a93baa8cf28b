//! State definition and transition table

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connectivity states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConnectivityState {
    /// Local broadcast mode; the device is reachable directly
    Direct,
    /// Joined an infrastructure network
    Connected,
    /// Looking for a stored network with usable signal
    CheckingCredentials,
    /// Connection attempt in progress
    Connecting,
    /// Unknown/previous-state sentinel; never entered by evaluation
    Off,
}

impl ConnectivityState {
    /// Check if the device is on an infrastructure network
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }

    /// Short human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            ConnectivityState::Direct => "direct",
            ConnectivityState::Connected => "connected",
            ConnectivityState::CheckingCredentials => "checking-credentials",
            ConnectivityState::Connecting => "connecting",
            ConnectivityState::Off => "off",
        }
    }

    /// Process an event and return the next state
    ///
    /// Pairs not listed here leave the state unchanged.
    pub fn transition(self, event: Event) -> Self {
        use ConnectivityState::*;
        use Event::*;

        match (self, event) {
            // Direct transitions
            (Direct, NetworkReady) => Connected,
            (Direct, DirectDwellElapsed) => CheckingCredentials,

            // Connected transitions
            (Connected, BroadcastModeForced) => Direct,
            (Connected, ConnectionLost) => CheckingCredentials,

            // CheckingCredentials transitions
            (CheckingCredentials, NoCredentials) => Direct,
            (CheckingCredentials, StoredNetworkFound) => Connecting,
            (CheckingCredentials, CheckTimedOut) => Direct,

            // Connecting transitions
            (Connecting, NetworkReady) => Connected,
            (Connecting, ConnectTimedOut) => Direct,

            // Off has no outgoing transitions
            _ => self,
        }
    }
}

impl core::fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [Event; 8] = [
        Event::NetworkReady,
        Event::BroadcastModeForced,
        Event::ConnectionLost,
        Event::NoCredentials,
        Event::StoredNetworkFound,
        Event::CheckTimedOut,
        Event::ConnectTimedOut,
        Event::DirectDwellElapsed,
    ];

    #[test]
    fn test_direct_transitions() {
        let state = ConnectivityState::Direct;
        assert_eq!(
            state.transition(Event::NetworkReady),
            ConnectivityState::Connected
        );
        assert_eq!(
            state.transition(Event::DirectDwellElapsed),
            ConnectivityState::CheckingCredentials
        );
    }

    #[test]
    fn test_connected_transitions() {
        let state = ConnectivityState::Connected;
        assert_eq!(
            state.transition(Event::BroadcastModeForced),
            ConnectivityState::Direct
        );
        assert_eq!(
            state.transition(Event::ConnectionLost),
            ConnectivityState::CheckingCredentials
        );
    }

    #[test]
    fn test_checking_flow() {
        let state = ConnectivityState::CheckingCredentials;
        assert_eq!(
            state.transition(Event::StoredNetworkFound),
            ConnectivityState::Connecting
        );
        assert_eq!(
            state.transition(Event::NoCredentials),
            ConnectivityState::Direct
        );
        assert_eq!(
            state.transition(Event::CheckTimedOut),
            ConnectivityState::Direct
        );
    }

    #[test]
    fn test_connecting_flow() {
        let state = ConnectivityState::Connecting;
        assert_eq!(
            state.transition(Event::NetworkReady),
            ConnectivityState::Connected
        );
        assert_eq!(
            state.transition(Event::ConnectTimedOut),
            ConnectivityState::Direct
        );
    }

    #[test]
    fn test_off_is_absorbing() {
        for event in ALL_EVENTS {
            assert_eq!(
                ConnectivityState::Off.transition(event),
                ConnectivityState::Off
            );
        }
    }

    #[test]
    fn test_unrelated_events_keep_state() {
        assert_eq!(
            ConnectivityState::Connected.transition(Event::CheckTimedOut),
            ConnectivityState::Connected
        );
        assert_eq!(
            ConnectivityState::Direct.transition(Event::ConnectTimedOut),
            ConnectivityState::Direct
        );
        assert_eq!(
            ConnectivityState::Connecting.transition(Event::StoredNetworkFound),
            ConnectivityState::Connecting
        );
    }

    #[test]
    fn test_every_live_state_can_reach_direct() {
        // Direct is the fallback; every other live state has a one-step path to it
        for state in [
            ConnectivityState::Connected,
            ConnectivityState::CheckingCredentials,
            ConnectivityState::Connecting,
        ] {
            assert!(ALL_EVENTS
                .iter()
                .any(|e| state.transition(*e) == ConnectivityState::Direct));
        }
    }

    #[test]
    fn test_is_connected() {
        assert!(ConnectivityState::Connected.is_connected());
        assert!(!ConnectivityState::Direct.is_connected());
        assert!(!ConnectivityState::CheckingCredentials.is_connected());
        assert!(!ConnectivityState::Connecting.is_connected());
        assert!(!ConnectivityState::Off.is_connected());
    }
}

//! Connectivity controller
//!
//! Owns the state machine, its timers and the advisory flags. The surrounding
//! application calls [`ConnectivityController::poll`] from its main loop; the
//! controller throttles itself to one evaluation per sample interval.
//!
//! Each evaluation asks the handler for the current state which [`Event`], if
//! any, applies, and feeds it through [`ConnectivityState::transition`].
//! Handlers also perform the radio side effects of their state (entering
//! broadcast mode, issuing connect requests, servicing the cloud session).

use embedded_hal::delay::DelayNs;

use crate::config::{ConfigError, ControllerConfig, PollTrigger};
use crate::fmt::{debug, info, warning};
use crate::scan::{ScanCollector, ScanOutcome};
use crate::state::{ConnectivityState, Event, Transition};
use crate::traits::{
    elapsed_ms, AccessPoint, Clock, CloudSession, ConnectOptions, CredentialList, WifiDevice,
};

/// Result of waiting for broadcast mode before the first scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrimeOutcome {
    /// Radio confirmed broadcast mode
    Confirmed,
    /// Radio did not confirm within the configured bound
    TimedOut,
}

/// Snapshot of controller state for user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Current state
    pub state: ConnectivityState,
    /// Last connection attempt timed out (bad password or unstable link)
    pub failed_connection_attempt: bool,
    /// A stored network was seen but its signal was too weak to use
    pub weak_signal: bool,
    /// Time since the current state was entered (ms)
    pub time_in_state_ms: u32,
}

/// Wi-Fi supervisory controller
///
/// Keeps the device on a stored network when one is reachable with usable
/// signal and falls back to broadcast (direct) mode otherwise. Every state has
/// a path back to `Direct`, so the controller never needs a reset.
pub struct ConnectivityController<W, S, K, D> {
    wifi: W,
    session: S,
    clock: K,
    delay: D,
    config: ControllerConfig,
    /// Current state
    state: ConnectivityState,
    /// State in effect before the most recent evaluation
    previous_state: ConnectivityState,
    /// Clock reading when `state` was entered
    state_entered_ms: u32,
    /// Clock reading of the last evaluation (None = evaluate on next poll)
    last_poll_ms: Option<u32>,
    /// Clock reading of the last session clock sync
    last_clock_sync_ms: Option<u32>,
    /// Radio has been through broadcast mode once, so scans are safe
    radio_primed: bool,
    failed_connection_attempt: bool,
    weak_signal: bool,
}

impl<W, S, K, D> ConnectivityController<W, S, K, D>
where
    W: WifiDevice,
    S: CloudSession,
    K: Clock,
    D: DelayNs,
{
    /// Create a controller
    ///
    /// The controller starts in `Off` and does nothing until [`setup`]
    /// is called.
    ///
    /// [`setup`]: Self::setup
    pub fn new(
        wifi: W,
        session: S,
        clock: K,
        delay: D,
        config: ControllerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let now = clock.now_ms();
        Ok(Self {
            wifi,
            session,
            clock,
            delay,
            config,
            state: ConnectivityState::Off,
            previous_state: ConnectivityState::Off,
            state_entered_ms: now,
            last_poll_ms: None,
            last_clock_sync_ms: None,
            radio_primed: false,
            failed_connection_attempt: false,
            weak_signal: false,
        })
    }

    /// Start supervising
    ///
    /// Seeds the machine into `CheckingCredentials` and makes the next
    /// [`poll`](Self::poll) evaluate immediately. With `evaluate_on_setup`
    /// the first evaluation runs here instead.
    pub fn setup(&mut self) -> Option<Transition> {
        info!("connectivity controller starting");

        let now = self.clock.now_ms();
        self.radio_primed = false;
        self.last_poll_ms = None;
        self.previous_state = ConnectivityState::Off;
        self.state = ConnectivityState::CheckingCredentials;
        self.state_entered_ms = now;

        if self.config.evaluate_on_setup {
            let transition = self.evaluate(now);
            self.last_poll_ms = Some(now);
            transition
        } else {
            None
        }
    }

    /// Run one evaluation if one is due
    ///
    /// Returns the transition taken, if the evaluation changed state.
    pub fn poll(&mut self) -> Option<Transition> {
        let now = self.clock.now_ms();
        if !self.evaluation_due(now) {
            return None;
        }

        let transition = self.evaluate(now);
        self.last_poll_ms = Some(now);
        transition
    }

    /// Check if the device is on an infrastructure network
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Extend the stay in direct mode
    ///
    /// Restarts the direct-mode dwell timer when called in `Direct` (e.g.
    /// from a request handler on the local network, as evidence someone is
    /// using it). Does nothing in any other state.
    pub fn reset_retry_timer(&mut self) {
        if self.state == ConnectivityState::Direct {
            self.state_entered_ms = self.clock.now_ms();
            debug!("direct mode dwell timer restarted");
        }
    }

    /// Get current state
    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Last connection attempt timed out
    pub fn failed_connection_attempt(&self) -> bool {
        self.failed_connection_attempt
    }

    /// A stored network was seen with too weak a signal
    pub fn weak_signal(&self) -> bool {
        self.weak_signal
    }

    /// Time since the current state was entered (ms)
    pub fn time_in_state_ms(&self) -> u32 {
        elapsed_ms(self.clock.now_ms(), self.state_entered_ms)
    }

    /// Snapshot of state and advisory flags
    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            failed_connection_attempt: self.failed_connection_attempt,
            weak_signal: self.weak_signal,
            time_in_state_ms: self.time_in_state_ms(),
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get access to the Wi-Fi device
    pub fn wifi(&self) -> &W {
        &self.wifi
    }

    /// Get mutable access to the Wi-Fi device
    pub fn wifi_mut(&mut self) -> &mut W {
        &mut self.wifi
    }

    /// Get access to the cloud session
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Get mutable access to the cloud session
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    fn evaluation_due(&self, now: u32) -> bool {
        let interval_elapsed = match self.last_poll_ms {
            Some(last) => elapsed_ms(now, last) >= self.config.sample_interval_ms,
            None => true,
        };

        let state_changed = self.config.poll_trigger == PollTrigger::IntervalOrStateChange
            && self.state != self.previous_state;

        interval_elapsed || state_changed
    }

    /// Evaluate the current state once and apply the resulting transition
    fn evaluate(&mut self, now: u32) -> Option<Transition> {
        let from = self.state;
        self.previous_state = from;

        let event = match from {
            ConnectivityState::Direct => self.on_direct(now),
            ConnectivityState::Connected => self.on_connected(now),
            ConnectivityState::CheckingCredentials => self.on_checking_credentials(),
            ConnectivityState::Connecting => self.on_connecting(now),
            ConnectivityState::Off => None,
        };

        let event = event?;
        // Priming the radio can block, so take the transition time afresh
        let now = self.clock.now_ms();
        let to = from.transition(event);
        if to == from {
            return None;
        }

        info!(
            "wifi: {} -> {} on {} after {} ms",
            from,
            to,
            event,
            elapsed_ms(now, self.state_entered_ms)
        );

        self.state = to;
        self.state_entered_ms = now;

        Some(Transition {
            from,
            to,
            event,
            at_ms: now,
        })
    }

    fn on_direct(&mut self, now: u32) -> Option<Event> {
        if self.wifi.is_network_ready() {
            return Some(Event::NetworkReady);
        }

        // Something may have pulled the radio out of broadcast mode
        if !self.wifi.is_broadcast_mode_active() {
            debug!("re-entering broadcast mode");
            self.wifi.enter_broadcast_mode();
        }

        if elapsed_ms(now, self.state_entered_ms) >= self.config.direct_dwell_ms {
            // fresh attempt cycle
            self.weak_signal = false;
            return Some(Event::DirectDwellElapsed);
        }

        None
    }

    fn on_connected(&mut self, now: u32) -> Option<Event> {
        let event = if self.wifi.is_broadcast_mode_active() {
            Some(Event::BroadcastModeForced)
        } else if !self.wifi.is_network_ready() {
            Some(Event::ConnectionLost)
        } else {
            None
        };

        self.service_session(now);
        event
    }

    fn on_checking_credentials(&mut self) -> Option<Event> {
        if !self.wifi.has_stored_credentials() {
            return Some(Event::NoCredentials);
        }

        // The list can change between ticks, so read it every time
        let mut stored = CredentialList::new();
        self.wifi.stored_credentials(&mut stored);

        let outcome = self.scan_for_stored(&stored);
        let timed_out = elapsed_ms(self.clock.now_ms(), self.state_entered_ms)
            >= self.config.check_timeout_ms;

        match outcome {
            ScanOutcome::Found { rssi } if rssi > self.config.min_rssi_dbm => {
                debug!(
                    "stored network usable ({})",
                    crate::scan::SignalQuality::classify(rssi)
                );
                if self.wifi.is_broadcast_mode_active() {
                    self.wifi.exit_broadcast_mode();
                }
                self.failed_connection_attempt = false;
                self.weak_signal = false;
                Some(Event::StoredNetworkFound)
            }
            ScanOutcome::Found { rssi: _rssi } => {
                warning!("stored network too weak: {} dBm", _rssi);
                self.weak_signal = true;
                timed_out.then_some(Event::CheckTimedOut)
            }
            ScanOutcome::NotFound => timed_out.then_some(Event::CheckTimedOut),
        }
    }

    fn on_connecting(&mut self, now: u32) -> Option<Event> {
        // Readiness only counts within the budget
        if elapsed_ms(now, self.state_entered_ms) >= self.config.connect_timeout_ms {
            // Advisory only; the next cycle still retries
            warning!("connection attempt timed out");
            self.failed_connection_attempt = true;
            return Some(Event::ConnectTimedOut);
        }

        if self.wifi.is_network_ready() {
            return Some(Event::NetworkReady);
        }

        if !self.wifi.is_connect_attempt_in_progress() {
            info!("requesting connection");
            self.wifi.request_connect(ConnectOptions {
                skip_auto_broadcast: true,
            });
        }

        None
    }

    /// Keep the cloud session alive while connected
    fn service_session(&mut self, now: u32) {
        if !self.session.is_linked() {
            debug!("linking cloud session");
            self.session.link();
            return;
        }

        self.session.pump();

        let sync_due = match self.last_clock_sync_ms {
            Some(last) => elapsed_ms(now, last) >= self.config.clock_sync_interval_ms,
            None => true,
        };
        if sync_due {
            info!("syncing clock");
            self.session.sync_clock();
            self.last_clock_sync_ms = Some(now);
        }
    }

    /// Run one scan pass against the stored credential list
    ///
    /// The first scan in the controller's lifetime is preceded by priming
    /// the radio; if priming times out the scan is skipped and reported as
    /// no match, and priming is retried on the next credential check.
    fn scan_for_stored(&mut self, stored: &CredentialList) -> ScanOutcome {
        if !self.radio_primed {
            match self.prime_radio() {
                PrimeOutcome::Confirmed => self.radio_primed = true,
                PrimeOutcome::TimedOut => {
                    warning!("radio did not confirm broadcast mode, skipping scan");
                    return ScanOutcome::NotFound;
                }
            }
        }

        let mut collector = ScanCollector::new(stored);
        self.wifi
            .scan(&mut |record: &AccessPoint| collector.observe(record));
        collector.finish()
    }

    /// Power the radio and wait (bounded) for broadcast mode
    ///
    /// Some radio firmware faults when scanning before it has been in
    /// broadcast mode at least once.
    fn prime_radio(&mut self) -> PrimeOutcome {
        info!("priming radio before first scan");
        self.wifi.power_on();
        self.wifi.enter_broadcast_mode();

        for _ in 0..self.config.listen_poll_budget() {
            if self.wifi.is_broadcast_mode_active() {
                return PrimeOutcome::Confirmed;
            }
            self.delay.delay_ms(self.config.listen_poll_step_ms);
        }

        if self.wifi.is_broadcast_mode_active() {
            PrimeOutcome::Confirmed
        } else {
            PrimeOutcome::TimedOut
        }
    }
}

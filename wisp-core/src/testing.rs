//! Scripted platform doubles for host tests

use core::cell::Cell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::config::ControllerConfig;
use crate::controller::ConnectivityController;
use crate::traits::{
    AccessPoint, Clock, CloudSession, ConnectOptions, CredentialList, CredentialStore, Radio,
    Scanner, Ssid,
};

/// Maximum records a mock scan reports
pub const MAX_VISIBLE: usize = 8;

pub fn ssid(name: &str) -> Ssid {
    Ssid::try_from(name).unwrap()
}

pub fn ap(name: &str, rssi: i16) -> AccessPoint {
    AccessPoint {
        ssid: ssid(name),
        rssi,
    }
}

/// Clock advanced by hand (and by `MockDelay`)
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    pub fn starting_at(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Delay that moves the mock clock forward instead of sleeping
pub struct MockDelay<'a> {
    clock: &'a MockClock,
    pub calls: u32,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a MockClock) -> Self {
        Self { clock, calls: 0 }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.clock.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.clock.advance(ms);
    }
}

/// Radio, credential store and scanner in one recording double
#[derive(Debug, Default)]
pub struct MockWifi {
    pub ready: bool,
    pub broadcast: bool,
    pub connecting: bool,
    pub powered: bool,
    /// Ignore requests to enter broadcast mode
    pub broadcast_blocked: bool,
    pub credentials: CredentialList,
    pub visible: Vec<AccessPoint, MAX_VISIBLE>,
    pub power_on_calls: u32,
    pub enter_broadcast_calls: u32,
    pub exit_broadcast_calls: u32,
    pub connect_requests: u32,
    pub last_connect: Option<ConnectOptions>,
    pub credential_reads: u32,
    pub scans: u32,
}

impl MockWifi {
    pub fn with_credentials(names: &[&str]) -> Self {
        let mut wifi = Self::default();
        wifi.set_credentials(names);
        wifi
    }

    pub fn set_credentials(&mut self, names: &[&str]) {
        self.credentials = names.iter().map(|n| ssid(n)).collect();
    }

    pub fn set_visible(&mut self, records: &[AccessPoint]) {
        self.visible = records.iter().cloned().collect();
    }
}

impl Radio for MockWifi {
    fn power_on(&mut self) {
        self.power_on_calls += 1;
        self.powered = true;
    }

    fn is_network_ready(&self) -> bool {
        self.ready
    }

    fn is_broadcast_mode_active(&self) -> bool {
        self.broadcast
    }

    fn enter_broadcast_mode(&mut self) {
        self.enter_broadcast_calls += 1;
        if !self.broadcast_blocked {
            self.broadcast = true;
        }
    }

    fn exit_broadcast_mode(&mut self) {
        self.exit_broadcast_calls += 1;
        self.broadcast = false;
    }

    fn is_connect_attempt_in_progress(&self) -> bool {
        self.connecting
    }

    fn request_connect(&mut self, options: ConnectOptions) {
        self.connect_requests += 1;
        self.last_connect = Some(options);
        self.connecting = true;
    }
}

impl CredentialStore for MockWifi {
    fn has_stored_credentials(&self) -> bool {
        !self.credentials.is_empty()
    }

    fn stored_credentials(&mut self, out: &mut CredentialList) {
        self.credential_reads += 1;
        out.clear();
        out.extend(self.credentials.iter().cloned());
    }
}

impl Scanner for MockWifi {
    fn scan(&mut self, on_result: &mut dyn FnMut(&AccessPoint)) {
        self.scans += 1;
        for record in self.visible.iter() {
            on_result(record);
        }
    }
}

/// Recording cloud session
#[derive(Debug, Default)]
pub struct MockSession {
    pub linked: bool,
    /// Whether `link` succeeds immediately
    pub link_succeeds: bool,
    pub link_calls: u32,
    pub pump_calls: u32,
    pub sync_calls: u32,
}

impl CloudSession for MockSession {
    fn is_linked(&self) -> bool {
        self.linked
    }

    fn link(&mut self) {
        self.link_calls += 1;
        if self.link_succeeds {
            self.linked = true;
        }
    }

    fn pump(&mut self) {
        self.pump_calls += 1;
    }

    fn sync_clock(&mut self) {
        self.sync_calls += 1;
    }
}

pub type TestController<'a> =
    ConnectivityController<MockWifi, MockSession, &'a MockClock, MockDelay<'a>>;

/// Controller wired to mocks, already set up
pub fn controller_with(
    clock: &MockClock,
    wifi: MockWifi,
    config: ControllerConfig,
) -> TestController<'_> {
    let mut controller = ConnectivityController::new(
        wifi,
        MockSession::default(),
        clock,
        MockDelay::new(clock),
        config,
    )
    .unwrap();
    controller.setup();
    controller
}

pub fn controller(clock: &MockClock, wifi: MockWifi) -> TestController<'_> {
    controller_with(clock, wifi, ControllerConfig::default())
}

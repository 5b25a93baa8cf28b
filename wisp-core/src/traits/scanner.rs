//! Network scanning

use super::credentials::Ssid;

/// One network record reported by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessPoint {
    /// Network identifier
    pub ssid: Ssid,
    /// Received signal strength (dBm)
    pub rssi: i16,
}

/// Synchronous network scanner
pub trait Scanner {
    /// Enumerate currently visible networks
    ///
    /// `on_result` is called once per record, in driver order, before this
    /// method returns. Implementations must not defer callbacks.
    fn scan(&mut self, on_result: &mut dyn FnMut(&AccessPoint));
}

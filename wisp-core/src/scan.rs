//! Scan result collection
//!
//! A [`ScanCollector`] is handed each record of one scan pass and remembers
//! the first record whose SSID is in the stored credential list.

use crate::traits::{AccessPoint, Ssid};

/// Result of one scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanOutcome {
    /// No stored network was seen
    #[default]
    NotFound,
    /// A stored network was seen; first match in scan order
    Found {
        /// Signal strength of the matched record (dBm)
        rssi: i16,
    },
}

impl ScanOutcome {
    /// Check if a stored network was seen
    pub fn is_found(&self) -> bool {
        matches!(self, ScanOutcome::Found { .. })
    }

    /// Signal strength of the match, if any
    pub fn rssi(&self) -> Option<i16> {
        match self {
            ScanOutcome::Found { rssi } => Some(*rssi),
            ScanOutcome::NotFound => None,
        }
    }
}

/// Matches scan records against stored network identifiers
#[derive(Debug)]
pub struct ScanCollector<'a> {
    stored: &'a [Ssid],
    outcome: ScanOutcome,
}

impl<'a> ScanCollector<'a> {
    /// Create a collector for one scan pass
    pub fn new(stored: &'a [Ssid]) -> Self {
        Self {
            stored,
            outcome: ScanOutcome::NotFound,
        }
    }

    /// Feed one scan record
    ///
    /// Once a match has been recorded, later records are ignored.
    pub fn observe(&mut self, record: &AccessPoint) {
        if self.outcome.is_found() {
            return;
        }

        if self.stored.iter().any(|ssid| ssid.as_str() == record.ssid.as_str()) {
            crate::fmt::debug!(
                "stored SSID {} visible, rssi {}",
                record.ssid.as_str(),
                record.rssi
            );
            self.outcome = ScanOutcome::Found { rssi: record.rssi };
        }
    }

    /// Outcome so far
    pub fn outcome(&self) -> ScanOutcome {
        self.outcome
    }

    /// Finish the pass and return its outcome
    pub fn finish(self) -> ScanOutcome {
        self.outcome
    }
}

/// Coarse signal strength buckets, for logs and user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalQuality {
    /// Stronger than -50 dBm
    Excellent,
    /// -60 to -50 dBm
    Good,
    /// -75 to -60 dBm
    Fair,
    /// -75 dBm or weaker
    Weak,
}

impl SignalQuality {
    /// Classify a signal strength reading (dBm)
    pub fn classify(rssi: i16) -> Self {
        if rssi > -50 {
            SignalQuality::Excellent
        } else if rssi > -60 {
            SignalQuality::Good
        } else if rssi > -75 {
            SignalQuality::Fair
        } else {
            SignalQuality::Weak
        }
    }
}

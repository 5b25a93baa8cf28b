//! Stored credential access

use heapless::{String, Vec};

/// Maximum SSID length in bytes (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum number of remembered networks read per credential check
pub const MAX_STORED_CREDENTIALS: usize = 5;

/// Network identifier
pub type Ssid = String<MAX_SSID_LEN>;

/// Stored network identifiers, in platform order
pub type CredentialList = Vec<Ssid, MAX_STORED_CREDENTIALS>;

/// Platform credential storage
///
/// Only the network identifiers are visible here; secrets stay inside the
/// platform. The list may change at runtime (e.g. through a provisioning
/// page), so the controller re-reads it on every credential check.
pub trait CredentialStore {
    /// Check whether any network credentials are stored
    fn has_stored_credentials(&self) -> bool;

    /// Replace the contents of `out` with the stored network identifiers
    ///
    /// Implementations stop at `MAX_STORED_CREDENTIALS` entries.
    fn stored_credentials(&mut self, out: &mut CredentialList);
}

//! Collaborator traits
//!
//! These traits define the interface between the connectivity logic and the
//! platform's radio driver, credential storage, cloud session and clock.

pub mod clock;
pub mod credentials;
pub mod radio;
pub mod scanner;
pub mod session;

pub use clock::{elapsed_ms, Clock};
pub use credentials::{CredentialList, CredentialStore, Ssid, MAX_SSID_LEN, MAX_STORED_CREDENTIALS};
pub use radio::{ConnectOptions, Radio};
pub use scanner::{AccessPoint, Scanner};
pub use session::{CloudSession, NoSession};

/// Everything the controller needs from the Wi-Fi hardware
///
/// Most platforms expose radio control, credential storage and scanning
/// through one driver object; this trait lets the controller take it as a
/// single type parameter.
pub trait WifiDevice: Radio + CredentialStore + Scanner {}

// Blanket implementation for types that implement all three traits
impl<T: Radio + CredentialStore + Scanner> WifiDevice for T {}

//! Board-agnostic core logic for the Wi-Fi supervisor
//!
//! This crate contains all connectivity logic that does not depend on a
//! specific radio or platform SDK:
//!
//! - Collaborator traits (radio, credential store, scanner, cloud session, clock)
//! - Connectivity state machine and transition table
//! - Scan result collection against the stored credential list
//! - Controller that drives the state machine from a polling loop
//! - Configuration types and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod fmt;

pub mod config;
pub mod controller;
pub mod scan;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, ControllerConfig, PollTrigger};
pub use controller::{ConnectivityController, Status};
pub use state::{ConnectivityState, Event, Transition};

//! Connectivity state machine
//!
//! The controller evaluates the current state against what the radio reports,
//! derives an [`Event`], and the transition table maps it to the next state.

pub mod events;
pub mod machine;

pub use events::{Event, Transition};
pub use machine::ConnectivityState;

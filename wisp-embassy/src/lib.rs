//! Embassy integration for the connectivity controller
//!
//! Boards running the embassy executor use [`EmbassyClock`] as the
//! controller's time source, `embassy_time::Delay` for the first-scan wait,
//! and drive the controller with [`supervise`] from a task of their own
//! (tasks cannot be generic, so the board wraps it):
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn wifi_task(mut controller: EmbassyController<BoardWifi, NoSession>) {
//!     controller.setup();
//!     wisp_embassy::supervise(&mut controller, SUPERVISE_TICK).await
//! }
//! ```
//!
//! Other tasks (UI, HTTP handlers on the direct network) read the latest
//! [`Status`] from [`STATUS`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_hal::delay::DelayNs;

use wisp_core::traits::{Clock, CloudSession, WifiDevice};
use wisp_core::{ConfigError, ConnectivityController, ControllerConfig, Status};

/// Default interval between `poll` calls
///
/// Shorter than the controller's sample interval so state-change
/// re-evaluation (when enabled) is picked up promptly.
pub const SUPERVISE_TICK: Duration = Duration::from_millis(100);

/// Latest controller status, updated after every tick
pub static STATUS: Signal<CriticalSectionRawMutex, Status> = Signal::new();

/// Millisecond clock backed by `embassy_time::Instant`
///
/// Truncates to `u32`, which wraps after ~49 days; the controller's elapsed
/// time arithmetic is wraparound-safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// Controller wired to embassy time
pub type EmbassyController<W, S> = ConnectivityController<W, S, EmbassyClock, Delay>;

/// Create a controller that uses embassy time for its clock and delays
pub fn new_controller<W, S>(
    wifi: W,
    session: S,
    config: ControllerConfig,
) -> Result<EmbassyController<W, S>, ConfigError>
where
    W: WifiDevice,
    S: CloudSession,
{
    ConnectivityController::new(wifi, session, EmbassyClock, Delay, config)
}

/// Publish the controller's current status to [`STATUS`]
pub fn publish_status<W, S, K, D>(controller: &ConnectivityController<W, S, K, D>)
where
    W: WifiDevice,
    S: CloudSession,
    K: Clock,
    D: DelayNs,
{
    STATUS.signal(controller.status());
}

/// Poll the controller forever at a fixed tick
///
/// The controller must already be set up. Every tick calls `poll` and
/// publishes the resulting status.
pub async fn supervise<W, S, K, D>(
    controller: &mut ConnectivityController<W, S, K, D>,
    tick: Duration,
) -> !
where
    W: WifiDevice,
    S: CloudSession,
    K: Clock,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::info!("Wi-Fi supervisor started ({} ms tick)", tick.as_millis());

    let mut ticker = Ticker::every(tick);

    loop {
        if let Some(_transition) = controller.poll() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Wi-Fi transition: {}", _transition);
        }

        publish_status(controller);
        ticker.next().await;
    }
}

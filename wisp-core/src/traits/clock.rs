//! Monotonic millisecond clock

/// Monotonic millisecond counter since start
///
/// The counter is allowed to wrap at `u32::MAX`; every comparison in this
/// crate goes through [`elapsed_ms`].
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, correct across one wrap
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

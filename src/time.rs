//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Duration since an earlier instant, or `None` if `earlier` is in the future.
    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration>;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Plain millisecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl TimeDuration for Millis {
    const ZERO: Self = Millis(0);

    #[inline]
    fn as_millis(&self) -> u64 {
        self.0
    }

    #[inline]
    fn from_millis(millis: u64) -> Self {
        Millis(millis)
    }

    #[inline]
    fn saturating_sub(self, other: Self) -> Self {
        Millis(self.0.saturating_sub(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates_at_zero() {
        assert_eq!(Millis(5).saturating_sub(Millis(9)), Millis::ZERO);
        assert_eq!(Millis(9).saturating_sub(Millis(5)), Millis(4));
    }

    #[test]
    fn millis_round_trips_through_u64() {
        assert_eq!(Millis::from_millis(1500).as_millis(), 1500);
    }
}

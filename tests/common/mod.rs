//! Shared test infrastructure for light-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use light_sequencer::{
    Catalog, ChannelBits, ChannelOutput, Frame, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration> {
        self.0.checked_sub(earlier.0).map(TestDuration)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

/// Mock duration with microsecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MicroDuration(pub u64);

impl TimeDuration for MicroDuration {
    const ZERO: Self = MicroDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 / 1000
    }

    fn from_millis(millis: u64) -> Self {
        MicroDuration(millis * 1000)
    }

    fn saturating_sub(self, other: Self) -> Self {
        MicroDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant with microsecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MicroInstant(pub u64);

impl TimeInstant for MicroInstant {
    type Duration = MicroDuration;

    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration> {
        self.0.checked_sub(earlier.0).map(MicroDuration)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(MicroInstant)
    }
}

// ============================================================================
// Mock Output
// ============================================================================

pub const CHANNELS: usize = 5;

/// Mock output that records every write
pub struct MockOutput {
    current: ChannelBits<CHANNELS>,
    history: heapless::Vec<ChannelBits<CHANNELS>, 64>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            current: [false; CHANNELS],
            history: heapless::Vec::new(),
        }
    }

    pub fn last(&self) -> ChannelBits<CHANNELS> {
        self.current
    }

    pub fn history(&self) -> &[ChannelBits<CHANNELS>] {
        &self.history
    }
}

impl ChannelOutput<CHANNELS> for MockOutput {
    fn set_channels(&mut self, bits: &ChannelBits<CHANNELS>) {
        self.current = *bits;
        let _ = self.history.push(*bits);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Microsecond mock time source
pub struct MicroTimeSource {
    current_time: core::cell::Cell<MicroInstant>,
}

impl MicroTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(MicroInstant(0)),
        }
    }

    pub fn advance(&self, duration: MicroDuration) {
        let current = self.current_time.get();
        self.current_time.set(MicroInstant(current.0 + duration.0));
    }
}

impl TimeSource<MicroInstant> for MicroTimeSource {
    fn now(&self) -> MicroInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub type TestCatalog = Catalog<TestDuration, CHANNELS, 8, 8>;

/// Builds a frame from a `'0'`/`'1'` pattern
pub fn frame(pattern: &str, hold: u64) -> Frame<TestDuration, CHANNELS> {
    Frame::from_pattern(pattern, TestDuration(hold)).unwrap()
}

/// Channel states for a pattern
pub fn bits(pattern: &str) -> ChannelBits<CHANNELS> {
    frame(pattern, 1).bits
}

/// Catalog with a two-frame, a single-frame and an uneven sequence
pub fn test_catalog() -> TestCatalog {
    TestCatalog::builder()
        .with("AB", &[frame("11000", 1000), frame("00011", 500)])
        .unwrap()
        .with("SOLID", &[frame("01110", 1000)])
        .unwrap()
        .with(
            "UNEVEN",
            &[
                frame("10000", 100),
                frame("01000", 250),
                frame("00100", 30),
                frame("00010", 7),
            ],
        )
        .unwrap()
        .build()
}

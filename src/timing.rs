//! LED timing profiles and their tick-level pulse symbols.
//!
//! Timings are defined in nanoseconds and converted to clock ticks for a
//! given channel resolution: `ticks = ns * resolution_hz / 1_000_000_000`.
//! Tick counts are never hardcoded, so any resolution keeps the ratios.

use embassy_time::Duration;

use crate::error::StripError;
use crate::pulse::{Level, MAX_DURATION, PulseCode};

/// Resolution used by most strips (1 tick = 100 ns)
pub const DEFAULT_RESOLUTION_HZ: u32 = 10_000_000;

const NS_PER_SECOND: u64 = 1_000_000_000;
const US_PER_SECOND: u64 = 1_000_000;

/// Bit and latch timing of an LED driver chip, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedTiming {
    /// High time of a zero bit
    pub t0h_ns: u32,
    /// Low time of a zero bit
    pub t0l_ns: u32,
    /// High time of a one bit
    pub t1h_ns: u32,
    /// Low time of a one bit
    pub t1l_ns: u32,
    /// Minimum low time that latches the frame
    pub reset_ns: u32,
}

impl LedTiming {
    /// SK6812 / SK6812-RGBW
    pub const SK6812: Self = Self {
        t0h_ns: 300,
        t0l_ns: 900,
        t1h_ns: 600,
        t1l_ns: 600,
        reset_ns: 80_000,
    };

    /// WS2812 / WS2812B. The latch covers the 280 µs required by V5 parts.
    pub const WS2812: Self = Self {
        t0h_ns: 400,
        t0l_ns: 850,
        t1h_ns: 850,
        t1l_ns: 400,
        reset_ns: 280_000,
    };
}

impl Default for LedTiming {
    fn default() -> Self {
        Self::SK6812
    }
}

/// Convert a duration in nanoseconds to clock ticks (truncating)
pub const fn ticks(duration_ns: u32, resolution_hz: u32) -> u64 {
    duration_ns as u64 * resolution_hz as u64 / NS_PER_SECOND
}

/// The three symbols of the protocol at a fixed clock resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    zero: PulseCode,
    one: PulseCode,
    reset: PulseCode,
    resolution_hz: u32,
}

impl PulseTiming {
    /// Compute symbols for `timing` at `resolution_hz`.
    ///
    /// Fails with [`StripError::InvalidTiming`] if the resolution is zero,
    /// if any bit half rounds down to zero ticks, or if any duration does
    /// not fit a symbol field.
    pub fn new(timing: &LedTiming, resolution_hz: u32) -> Result<Self, StripError> {
        if resolution_hz == 0 {
            return Err(StripError::InvalidTiming);
        }
        let tick = |ns: u32| -> Result<u16, StripError> {
            let value = ticks(ns, resolution_hz);
            if value == 0 || value > u64::from(MAX_DURATION) {
                return Err(StripError::InvalidTiming);
            }
            u16::try_from(value).map_err(|_| StripError::InvalidTiming)
        };

        Ok(Self {
            zero: bit_symbol(tick(timing.t0h_ns)?, tick(timing.t0l_ns)?),
            one: bit_symbol(tick(timing.t1h_ns)?, tick(timing.t1l_ns)?),
            reset: reset_symbol(tick(timing.reset_ns)?),
            resolution_hz,
        })
    }

    /// SK6812 symbols at `resolution_hz`
    pub fn sk6812(resolution_hz: u32) -> Result<Self, StripError> {
        Self::new(&LedTiming::SK6812, resolution_hz)
    }

    /// Symbol for a zero bit
    pub const fn zero(&self) -> PulseCode {
        self.zero
    }

    /// Symbol for a one bit
    pub const fn one(&self) -> PulseCode {
        self.one
    }

    /// Latch symbol, emitted once after every frame
    pub const fn reset(&self) -> PulseCode {
        self.reset
    }

    pub const fn resolution_hz(&self) -> u32 {
        self.resolution_hz
    }

    /// On-wire time of a frame of `bytes` bytes including the latch,
    /// rounded up to whole microseconds.
    ///
    /// Useful as the lower bound of a completion timeout; long strips take
    /// longer than the short fixed waits commonly used.
    pub fn frame_duration(&self, bytes: usize) -> Duration {
        let bit_ticks = u64::from(self.zero.ticks().max(self.one.ticks()));
        let bits = (bytes as u64).saturating_mul(8);
        let total_ticks = bits
            .saturating_mul(bit_ticks)
            .saturating_add(u64::from(self.reset.ticks()));
        let resolution = u64::from(self.resolution_hz);
        let micros = total_ticks
            .saturating_mul(US_PER_SECOND)
            .div_ceil(resolution);
        Duration::from_micros(micros)
    }
}

impl Default for PulseTiming {
    /// SK6812 at [`DEFAULT_RESOLUTION_HZ`]
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        const T: LedTiming = LedTiming::SK6812;
        const RES: u32 = DEFAULT_RESOLUTION_HZ;
        Self {
            zero: bit_symbol(ticks(T.t0h_ns, RES) as u16, ticks(T.t0l_ns, RES) as u16),
            one: bit_symbol(ticks(T.t1h_ns, RES) as u16, ticks(T.t1l_ns, RES) as u16),
            reset: reset_symbol(ticks(T.reset_ns, RES) as u16),
            resolution_hz: RES,
        }
    }
}

const fn bit_symbol(high: u16, low: u16) -> PulseCode {
    PulseCode::new(Level::High, high, Level::Low, low)
}

const fn reset_symbol(low: u16) -> PulseCode {
    PulseCode::new(Level::Low, low, Level::Low, 0)
}

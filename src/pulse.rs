//! Hardware pulse symbols.
//!
//! A [`PulseCode`] is the unit a pulse-generation peripheral consumes: two
//! consecutive (level, duration) segments. Durations are clock ticks at the
//! channel resolution.

/// Largest duration a single symbol half can hold (15-bit field).
pub const MAX_DURATION: u16 = 0x7FFF;

const LEVEL_BIT: u32 = 1 << 15;
const HALF_SHIFT: u32 = 16;

/// Electrical level of one symbol half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    const fn bit(self) -> u32 {
        match self {
            Self::Low => 0,
            Self::High => LEVEL_BIT,
        }
    }

    const fn from_bit(raw: u32) -> Self {
        if raw & LEVEL_BIT == 0 {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// A single pulse descriptor: `level0` for `duration0` ticks, then
/// `level1` for `duration1` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseCode {
    pub level0: Level,
    pub duration0: u16,
    pub level1: Level,
    pub duration1: u16,
}

impl PulseCode {
    pub const fn new(level0: Level, duration0: u16, level1: Level, duration1: u16) -> Self {
        Self {
            level0,
            duration0,
            level1,
            duration1,
        }
    }

    /// Total length of the symbol in ticks
    pub const fn ticks(self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }

    /// Pack into a 32-bit RMT symbol word.
    ///
    /// Layout: `duration0` in bits 0..15, `level0` in bit 15, `duration1`
    /// in bits 16..31, `level1` in bit 31. Durations are masked to 15 bits.
    pub const fn to_raw(self) -> u32 {
        let low = (self.duration0 as u32 & MAX_DURATION as u32) | self.level0.bit();
        let high = (self.duration1 as u32 & MAX_DURATION as u32) | self.level1.bit();
        low | (high << HALF_SHIFT)
    }

    /// Unpack a 32-bit RMT symbol word
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_raw(raw: u32) -> Self {
        let high = raw >> HALF_SHIFT;
        Self {
            level0: Level::from_bit(raw),
            duration0: (raw & MAX_DURATION as u32) as u16,
            level1: Level::from_bit(high),
            duration1: (high & MAX_DURATION as u32) as u16,
        }
    }
}

impl Default for PulseCode {
    fn default() -> Self {
        Self::new(Level::Low, 0, Level::Low, 0)
    }
}

impl From<PulseCode> for u32 {
    fn from(code: PulseCode) -> Self {
        code.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_layout_matches_rmt_word() {
        let one = PulseCode::new(Level::High, 6, Level::Low, 6);
        assert_eq!(one.to_raw(), 0x0006_8006);

        let reset = PulseCode::new(Level::Low, 800, Level::Low, 0);
        assert_eq!(reset.to_raw(), 800);
        assert_eq!(PulseCode::from_raw(0x0006_8006), one);
    }
}

mod tests {
    use ledwire::timing::ticks;
    use ledwire::{LedTiming, Level, PulseCode, PulseTiming, StripError};

    #[test]
    fn test_default_ticks_at_10mhz() {
        let timing = PulseTiming::default();
        assert_eq!(timing.zero(), PulseCode::new(Level::High, 3, Level::Low, 9));
        assert_eq!(timing.one(), PulseCode::new(Level::High, 6, Level::Low, 6));
        assert_eq!(timing.reset(), PulseCode::new(Level::Low, 800, Level::Low, 0));
        assert_eq!(timing.resolution_hz(), 10_000_000);
        assert_eq!(PulseTiming::sk6812(10_000_000), Ok(timing));
    }

    #[test]
    fn test_ticks_recomputed_for_resolution() {
        let timing = PulseTiming::sk6812(80_000_000).unwrap();
        assert_eq!(timing.zero(), PulseCode::new(Level::High, 24, Level::Low, 72));
        assert_eq!(timing.one(), PulseCode::new(Level::High, 48, Level::Low, 48));
        assert_eq!(timing.reset().duration0, 6400);
    }

    #[test]
    fn test_ratios_preserved() {
        for resolution in [10_000_000, 20_000_000, 40_000_000, 80_000_000] {
            let timing = PulseTiming::sk6812(resolution).unwrap();
            let zero = timing.zero();
            let one = timing.one();
            assert_eq!(zero.duration1, zero.duration0 * 3);
            assert_eq!(one.duration0, one.duration1);
            assert_eq!(one.duration0, zero.duration0 * 2);
        }
    }

    #[test]
    fn test_ticks_formula() {
        assert_eq!(ticks(300, 10_000_000), 3);
        assert_eq!(ticks(80_000, 10_000_000), 800);
        assert_eq!(ticks(850, 10_000_000), 8);
        assert_eq!(ticks(u32::MAX, u32::MAX), 18_446_744_065);
    }

    #[test]
    fn test_invalid_resolutions() {
        // Zero clock
        assert_eq!(PulseTiming::sk6812(0), Err(StripError::InvalidTiming));
        // 300 ns high time rounds down to zero ticks
        assert_eq!(PulseTiming::sk6812(1_000_000), Err(StripError::InvalidTiming));
        // 80 us latch does not fit a 15-bit symbol field
        assert_eq!(PulseTiming::sk6812(500_000_000), Err(StripError::InvalidTiming));
    }

    #[test]
    fn test_ws2812_profile() {
        let timing = PulseTiming::new(&LedTiming::WS2812, 10_000_000).unwrap();
        assert_eq!(timing.zero(), PulseCode::new(Level::High, 4, Level::Low, 8));
        assert_eq!(timing.one(), PulseCode::new(Level::High, 8, Level::Low, 4));
        assert_eq!(timing.reset().duration0, 2800);
    }

    #[test]
    fn test_frame_duration() {
        let timing = PulseTiming::default();
        // 8 bits * 1.2 us + 80 us latch
        assert_eq!(timing.frame_duration(1).as_micros(), 90);
        assert_eq!(timing.frame_duration(0).as_micros(), 80);
        // 900 GRBW pixels
        assert_eq!(timing.frame_duration(3600).as_micros(), 34_640);
    }

    #[test]
    fn test_raw_symbol_round_trip() {
        let timing = PulseTiming::default();
        for code in [timing.zero(), timing.one(), timing.reset()] {
            assert_eq!(PulseCode::from_raw(code.to_raw()), code);
        }
        assert_eq!(u32::from(timing.zero()), 0x0009_8003);
    }
}

//! Frame buffer and pulse encoder for one-wire addressable LEDs
//! (SK6812, SK6812-RGBW, WS2812).
//!
//! Pixels are written into a [`Strip`]'s byte buffer in wire order. On
//! [`Strip::refresh`] the buffer is streamed through a [`FrameEncoder`] into
//! a hardware pulse channel: one symbol per bit, MSB first, and exactly one
//! latch symbol at the end of each frame.
#![no_std]

pub mod color;
pub mod encoder;
pub mod error;
pub mod format;
pub mod loopback;
pub mod math8;
pub mod pulse;
pub mod queue;
pub mod strip;
pub mod timing;

pub use color::{Rgb, Rgbw};
pub use encoder::{EncodeStatus, Encoded, EncoderState, FrameEncoder, FramePulses};
pub use error::{ChannelError, StripError};
pub use format::{ChannelFormat, PixelColor};
pub use pulse::{Level, PulseCode};
pub use strip::{Strip, StripConfig};
pub use timing::{DEFAULT_RESOLUTION_HZ, LedTiming, PulseTiming};

pub use embassy_time::Duration;

/// Parameters for acquiring a transmit channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    pub gpio: u8,
    pub resolution_hz: u32,
    /// Maximum transmissions in flight
    pub queue_depth: usize,
    /// Symbols the channel can hold at once
    pub mem_block_symbols: usize,
}

/// Pulse-generation hardware that hands out transmit channels
///
/// Implement this trait to support different hardware platforms.
pub trait PulsePeripheral {
    type Channel: PulseChannel;

    /// Bind a transmit channel to a GPIO at the given resolution
    fn acquire_channel(&mut self, config: &ChannelConfig) -> Result<Self::Channel, ChannelError>;

    /// Return a channel to the peripheral
    fn release_channel(&mut self, channel: Self::Channel) -> Result<(), ChannelError>;
}

/// One transmit channel of a pulse peripheral
pub trait PulseChannel {
    /// Start the output stage
    fn enable(&mut self) -> Result<(), ChannelError>;

    /// Stop the output stage
    fn disable(&mut self) -> Result<(), ChannelError>;

    /// Enqueue `frame` for transmission without waiting for it to finish.
    ///
    /// The channel pulls symbols from `encoder` window by window until it
    /// reports [`EncodeStatus::Complete`]; the encoder is reset by the
    /// caller beforehand. Implementations must not hold on to `frame` after
    /// returning. Fails with [`ChannelError::QueueFull`] when `queue_depth`
    /// transmissions are already in flight.
    fn transmit(
        &mut self,
        frame: &[u8],
        encoder: &mut FrameEncoder,
        loop_count: u32,
    ) -> Result<(), ChannelError>;

    /// Block until every queued transmission has finished or `timeout`
    /// elapses
    fn wait_completion(&mut self, timeout: Duration) -> Result<(), ChannelError>;
}

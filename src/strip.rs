use embassy_time::Duration;
use heapless::Vec;
use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::encoder::FrameEncoder;
use crate::error::StripError;
use crate::format::{ChannelFormat, PixelColor};
use crate::timing::{DEFAULT_RESOLUTION_HZ, LedTiming, PulseTiming};
use crate::{ChannelConfig, PulseChannel, PulsePeripheral};

/// Default depth of the hardware transmission queue
pub const DEFAULT_QUEUE_DEPTH: usize = 4;

/// Default symbol memory of one channel
pub const DEFAULT_MEM_BLOCK_SYMBOLS: usize = 64;

/// Configuration of one physical LED string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    pub led_count: usize,
    pub format: ChannelFormat,
    pub gpio: u8,
    /// Channel clock resolution
    pub resolution_hz: u32,
    pub timing: LedTiming,
    pub queue_depth: usize,
    pub mem_block_symbols: usize,
}

impl StripConfig {
    /// SK6812 timing at 10 MHz with a queue depth of 4
    pub const fn new(led_count: usize, format: ChannelFormat, gpio: u8) -> Self {
        Self {
            led_count,
            format,
            gpio,
            resolution_hz: DEFAULT_RESOLUTION_HZ,
            timing: LedTiming::SK6812,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            mem_block_symbols: DEFAULT_MEM_BLOCK_SYMBOLS,
        }
    }

    #[must_use]
    pub const fn with_resolution(mut self, resolution_hz: u32) -> Self {
        self.resolution_hz = resolution_hz;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: LedTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub const fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }

    #[must_use]
    pub const fn with_mem_block_symbols(mut self, mem_block_symbols: usize) -> Self {
        self.mem_block_symbols = mem_block_symbols;
        self
    }

    /// Channel parameters handed to the peripheral
    pub const fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            gpio: self.gpio,
            resolution_hz: self.resolution_hz,
            queue_depth: self.queue_depth,
            mem_block_symbols: self.mem_block_symbols,
        }
    }
}

/// An addressable LED string bound to one pulse channel.
///
/// Owns the frame buffer (`led_count * channels` bytes in wire order), the
/// streaming encoder and the channel. `CAPACITY` bounds the frame buffer in
/// bytes.
///
/// The strip does no internal locking: pixel writers on several tasks must
/// be serialized by the caller.
pub struct Strip<C: PulseChannel, const CAPACITY: usize> {
    channel: C,
    encoder: FrameEncoder,
    frame: Vec<u8, CAPACITY>,
    format: ChannelFormat,
    led_count: usize,
}

impl<C: PulseChannel, const CAPACITY: usize> Strip<C, CAPACITY> {
    /// Validate `config`, allocate a zeroed frame buffer and acquire the
    /// channel.
    ///
    /// The LED count and timing are checked before anything is allocated.
    /// The output stage is left disabled; call [`enable`](Self::enable).
    pub fn new<P>(peripheral: &mut P, config: &StripConfig) -> Result<Self, StripError>
    where
        P: PulsePeripheral<Channel = C>,
    {
        if config.led_count == 0 {
            return Err(StripError::InvalidLedCount);
        }
        let timing = PulseTiming::new(&config.timing, config.resolution_hz)?;

        let requested = config
            .format
            .frame_len(config.led_count)
            .ok_or(StripError::Allocation {
                requested: usize::MAX,
                capacity: CAPACITY,
            })?;
        let mut frame: Vec<u8, CAPACITY> = Vec::new();
        frame
            .resize(requested, 0)
            .map_err(|()| StripError::Allocation {
                requested,
                capacity: CAPACITY,
            })?;

        let channel = peripheral
            .acquire_channel(&config.channel_config())
            .map_err(|err| {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[Strip.new] failed to acquire channel on gpio {}: {}",
                    config.gpio, err
                );
                StripError::Peripheral(err)
            })?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Strip.new] {} leds ({:?}) on gpio {} at {} Hz",
            config.led_count, config.format, config.gpio, config.resolution_hz
        );

        Ok(Self {
            channel,
            encoder: FrameEncoder::new(timing),
            frame,
            format: config.format,
            led_count: config.led_count,
        })
    }

    /// Release the encoder, the channel and the frame buffer, in that order
    pub fn release<P>(self, peripheral: &mut P) -> Result<(), StripError>
    where
        P: PulsePeripheral<Channel = C>,
    {
        let Self {
            channel,
            encoder,
            frame,
            ..
        } = self;
        drop(encoder);
        let released = peripheral.release_channel(channel).map_err(|err| {
            #[cfg(feature = "esp32-log")]
            println!("[Strip.release] failed to release channel: {}", err);
            StripError::Peripheral(err)
        });
        drop(frame);
        released
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    pub const fn format(&self) -> ChannelFormat {
        self.format
    }

    pub const fn timing(&self) -> &PulseTiming {
        self.encoder.timing()
    }

    /// The whole frame buffer in wire order
    pub fn as_bytes(&self) -> &[u8] {
        &self.frame
    }

    /// Wire-order bytes of pixel `index`
    pub fn pixel(&self, index: usize) -> Option<&[u8]> {
        if index >= self.led_count {
            return None;
        }
        let start = self.format.offset(index);
        self.frame.get(start..start + self.format.channels())
    }

    /// Overwrite pixel `index`. Does not transmit.
    pub fn set_pixel(&mut self, index: usize, color: impl PixelColor) -> Result<(), StripError> {
        if index >= self.led_count {
            return Err(StripError::IndexOutOfRange {
                index,
                led_count: self.led_count,
            });
        }
        let start = self.format.offset(index);
        let end = start + self.format.channels();
        color.write_channels(self.format, &mut self.frame[start..end]);
        Ok(())
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: impl PixelColor) {
        let format = self.format;
        for slot in self.frame.chunks_exact_mut(format.channels()) {
            color.write_channels(format, slot);
        }
    }

    /// Zero the frame buffer
    pub fn clear(&mut self) {
        self.frame.fill(0);
    }

    /// Start the channel's output stage
    pub fn enable(&mut self) -> Result<(), StripError> {
        self.channel.enable().map_err(StripError::Peripheral)
    }

    /// Stop the channel's output stage
    pub fn disable(&mut self) -> Result<(), StripError> {
        self.channel.disable().map_err(StripError::Peripheral)
    }

    /// Queue the current frame for transmission.
    ///
    /// Returns once the channel has accepted the frame. Frames are sent in
    /// call order; when the channel's queue is full this fails with
    /// [`StripError::Transmit`].
    pub fn refresh(&mut self) -> Result<(), StripError> {
        self.encoder.reset();
        self.channel
            .transmit(&self.frame, &mut self.encoder, 0)
            .map_err(|err| {
                #[cfg(feature = "esp32-log")]
                println!("[Strip.refresh] transmit rejected: {}", err);
                self.encoder.reset();
                StripError::Transmit(err)
            })
    }

    /// Queue the current frame and wait up to `timeout` for the channel to
    /// drain.
    ///
    /// On [`StripError::Timeout`] the pulses already on the wire are not
    /// retracted; treat the LED state as unknown and refresh again.
    pub fn refresh_and_wait(&mut self, timeout: Duration) -> Result<(), StripError> {
        self.refresh()?;
        self.wait_done(timeout)
    }

    /// Wait up to `timeout` for every queued frame to finish
    pub fn wait_done(&mut self, timeout: Duration) -> Result<(), StripError> {
        self.channel.wait_completion(timeout).map_err(|err| {
            #[cfg(feature = "esp32-log")]
            println!("[Strip.wait_done] {} after {} us", err, timeout.as_micros());
            StripError::from_wait(err)
        })
    }

    /// On-wire time of one frame of this strip, latch included
    pub fn frame_duration(&self) -> Duration {
        self.timing().frame_duration(self.frame.len())
    }

    pub const fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

/// Writes up to `led_count` colors, starting at pixel 0, then refreshes
impl<C: PulseChannel, const CAPACITY: usize> SmartLedsWrite for Strip<C, CAPACITY> {
    type Error = StripError;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (index, color) in iterator.into_iter().take(self.led_count).enumerate() {
            self.set_pixel(index, color.into())?;
        }
        self.refresh()
    }
}

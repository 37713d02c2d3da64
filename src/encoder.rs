//! Byte to pulse encoding.
//!
//! Bits are sent MSB first, one symbol per bit, and every frame ends in
//! exactly one latch symbol. [`FramePulses`] yields a whole frame as an
//! iterator; [`FrameEncoder`] produces the same sequence in chunks for
//! peripherals whose symbol memory is smaller than a frame.

use core::iter::FusedIterator;

use crate::pulse::PulseCode;
use crate::timing::PulseTiming;

const BITS_PER_BYTE: usize = 8;

impl PulseTiming {
    /// Encode one byte into 8 symbols, MSB first
    pub fn encode_byte(&self, value: u8) -> [PulseCode; 8] {
        core::array::from_fn(|i| self.bit(value, i))
    }

    /// Encode a whole frame: `8 * buffer.len()` bit symbols then one reset
    pub fn encode_frame<'a>(&self, buffer: &'a [u8]) -> FramePulses<'a> {
        FramePulses {
            timing: *self,
            data: buffer,
            position: 0,
            reset_sent: false,
        }
    }

    /// Symbol for bit `index` of `value`, where index 0 is the MSB
    #[inline]
    fn bit(&self, value: u8, index: usize) -> PulseCode {
        if value & (0x80 >> index) != 0 {
            self.one()
        } else {
            self.zero()
        }
    }

    /// Symbol for the bit at absolute bit `position` of `data`
    #[inline]
    fn bit_at(&self, data: &[u8], position: usize) -> PulseCode {
        self.bit(data[position / BITS_PER_BYTE], position % BITS_PER_BYTE)
    }
}

/// Iterator over the symbols of one frame
#[derive(Debug, Clone)]
pub struct FramePulses<'a> {
    timing: PulseTiming,
    data: &'a [u8],
    position: usize,
    reset_sent: bool,
}

impl FramePulses<'_> {
    fn total_bits(&self) -> usize {
        self.data.len() * BITS_PER_BYTE
    }
}

impl Iterator for FramePulses<'_> {
    type Item = PulseCode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position < self.total_bits() {
            let code = self.timing.bit_at(self.data, self.position);
            self.position += 1;
            return Some(code);
        }
        if self.reset_sent {
            return None;
        }
        self.reset_sent = true;
        Some(self.timing.reset())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_bits() - self.position + usize::from(!self.reset_sent);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FramePulses<'_> {}

impl FusedIterator for FramePulses<'_> {}

/// Streaming encoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderState {
    /// Emitting bit symbols from the pixel buffer
    EncodingData,
    /// Pixel buffer exhausted, latch still pending
    EncodingReset,
    /// Frame fully emitted
    Complete,
}

/// Outcome of one [`FrameEncoder::encode`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeStatus {
    /// Symbol memory is full and the frame has more to emit
    MemoryFull,
    /// The frame, including its latch, has been emitted
    Complete,
}

/// Result of one [`FrameEncoder::encode`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Encoded {
    /// Number of symbols written to the output slice
    pub written: usize,
    pub status: EncodeStatus,
}

/// Chunked frame encoder.
///
/// Call [`encode`](Self::encode) with the same frame and a fresh symbol
/// window until it reports [`EncodeStatus::Complete`]. The cursor is bit
/// granular, so a byte may be split across windows. Call
/// [`reset`](Self::reset) before starting a new frame or after an abort.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    timing: PulseTiming,
    state: EncoderState,
    position: usize,
}

impl FrameEncoder {
    pub const fn new(timing: PulseTiming) -> Self {
        Self {
            timing,
            state: EncoderState::EncodingData,
            position: 0,
        }
    }

    pub const fn timing(&self) -> &PulseTiming {
        &self.timing
    }

    pub const fn state(&self) -> EncoderState {
        self.state
    }

    /// Number of bit symbols emitted for the current frame
    pub const fn bits_encoded(&self) -> usize {
        self.position
    }

    /// Drop partial progress and start over at the first bit
    pub fn reset(&mut self) {
        self.state = EncoderState::EncodingData;
        self.position = 0;
    }

    /// Encode as much of `data` as fits into `symbols`.
    ///
    /// `data` must be the same frame across calls until completion.
    pub fn encode(&mut self, data: &[u8], symbols: &mut [PulseCode]) -> Encoded {
        let mut written = 0;

        if self.state == EncoderState::EncodingData {
            let total_bits = data.len() * BITS_PER_BYTE;
            let take = (total_bits.saturating_sub(self.position)).min(symbols.len());
            for slot in &mut symbols[..take] {
                *slot = self.timing.bit_at(data, self.position);
                self.position += 1;
            }
            written += take;
            if self.position >= total_bits {
                self.state = EncoderState::EncodingReset;
            }
        }

        if self.state == EncoderState::EncodingReset {
            let Some(slot) = symbols.get_mut(written) else {
                return Encoded {
                    written,
                    status: EncodeStatus::MemoryFull,
                };
            };
            *slot = self.timing.reset();
            written += 1;
            self.state = EncoderState::Complete;
        }

        let status = match self.state {
            EncoderState::Complete => EncodeStatus::Complete,
            EncoderState::EncodingData | EncoderState::EncodingReset => EncodeStatus::MemoryFull,
        };
        Encoded { written, status }
    }
}

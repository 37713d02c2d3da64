//! Software pulse peripheral.
//!
//! Behaves like a pulse-generation peripheral without touching hardware:
//! channels stream frames through a fixed symbol window, keep up to the
//! configured queue depth of transmissions in flight, and complete them in
//! order as simulated wire time elapses. Used to run strips on a host.

use embassy_time::Duration;

use crate::encoder::{EncodeStatus, Encoded, FrameEncoder};
use crate::error::ChannelError;
use crate::pulse::PulseCode;
use crate::queue::TxQueue;
use crate::timing::PulseTiming;
use crate::{ChannelConfig, PulseChannel, PulsePeripheral};

const GPIO_WORDS: usize = 4;

/// Summary of one frame as it appeared on the simulated wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transmission {
    /// Total symbols emitted
    pub symbols: usize,
    /// One-bit symbols
    pub ones: usize,
    /// Zero-bit symbols
    pub zeros: usize,
    /// Latch symbols
    pub resets: usize,
    /// Symbol windows the frame was streamed through
    pub chunks: usize,
    pub loop_count: u32,
    /// First symbol of the frame
    pub first: Option<PulseCode>,
    /// Whether the final symbol was a latch
    pub reset_last: bool,
    /// Simulated time on the wire, repeats included
    pub duration: Duration,
}

impl Transmission {
    const fn new(loop_count: u32) -> Self {
        Self {
            symbols: 0,
            ones: 0,
            zeros: 0,
            resets: 0,
            chunks: 0,
            loop_count,
            first: None,
            reset_last: false,
            duration: Duration::from_ticks(0),
        }
    }

    fn observe(&mut self, timing: &PulseTiming, window: &[PulseCode]) {
        self.chunks += 1;
        for &code in window {
            self.symbols += 1;
            if code == timing.one() {
                self.ones += 1;
            } else if code == timing.zero() {
                self.zeros += 1;
            } else if code == timing.reset() {
                self.resets += 1;
            }
            self.first.get_or_insert(code);
            self.reset_last = code == timing.reset();
        }
    }
}

/// A set of software channels, one per GPIO
#[derive(Debug, Default)]
pub struct LoopbackPeripheral<const DEPTH: usize, const MEM: usize> {
    claimed: [u64; GPIO_WORDS],
    refuse: bool,
}

impl<const DEPTH: usize, const MEM: usize> LoopbackPeripheral<DEPTH, MEM> {
    pub const fn new() -> Self {
        Self {
            claimed: [0; GPIO_WORDS],
            refuse: false,
        }
    }

    /// Make every following acquisition fail with [`ChannelError::Unavailable`]
    pub fn set_refuse(&mut self, refuse: bool) {
        self.refuse = refuse;
    }

    /// Whether a channel is currently bound to `gpio`
    pub const fn is_claimed(&self, gpio: u8) -> bool {
        let (word, bit) = gpio_slot(gpio);
        self.claimed[word] & bit != 0
    }

    fn set_claimed(&mut self, gpio: u8, claimed: bool) {
        let (word, bit) = gpio_slot(gpio);
        if claimed {
            self.claimed[word] |= bit;
        } else {
            self.claimed[word] &= !bit;
        }
    }
}

const fn gpio_slot(gpio: u8) -> (usize, u64) {
    ((gpio / 64) as usize, 1 << (gpio % 64))
}

impl<const DEPTH: usize, const MEM: usize> PulsePeripheral for LoopbackPeripheral<DEPTH, MEM> {
    type Channel = LoopbackChannel<DEPTH, MEM>;

    fn acquire_channel(&mut self, config: &ChannelConfig) -> Result<Self::Channel, ChannelError> {
        if self.refuse || self.is_claimed(config.gpio) {
            return Err(ChannelError::Unavailable);
        }
        if config.queue_depth == 0
            || config.queue_depth > DEPTH
            || config.mem_block_symbols == 0
            || MEM == 0
            || config.resolution_hz == 0
        {
            return Err(ChannelError::Rejected);
        }
        self.set_claimed(config.gpio, true);

        Ok(LoopbackChannel {
            gpio: config.gpio,
            depth: config.queue_depth,
            window: config.mem_block_symbols.min(MEM),
            enabled: false,
            stalled: false,
            pending: TxQueue::new(),
            memory: [PulseCode::default(); MEM],
            completed: 0,
            last: None,
        })
    }

    fn release_channel(&mut self, channel: Self::Channel) -> Result<(), ChannelError> {
        if !self.is_claimed(channel.gpio) {
            return Err(ChannelError::Rejected);
        }
        self.set_claimed(channel.gpio, false);
        Ok(())
    }
}

/// One software channel
pub struct LoopbackChannel<const DEPTH: usize, const MEM: usize> {
    gpio: u8,
    depth: usize,
    window: usize,
    enabled: bool,
    stalled: bool,
    pending: TxQueue<Transmission, DEPTH>,
    memory: [PulseCode; MEM],
    completed: usize,
    last: Option<Transmission>,
}

impl<const DEPTH: usize, const MEM: usize> LoopbackChannel<DEPTH, MEM> {
    pub const fn gpio(&self) -> u8 {
        self.gpio
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Symbols streamed per window
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Transmissions accepted but not yet completed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Transmissions completed since the channel was acquired
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Most recently completed transmission
    pub const fn last_completed(&self) -> Option<&Transmission> {
        self.last.as_ref()
    }

    /// Simulate a hung output: waits time out while anything is pending
    pub fn set_stalled(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    /// Finish the oldest pending transmission
    pub fn complete_next(&mut self) -> Option<Transmission> {
        let done = self.pending.pop()?;
        self.completed += 1;
        self.last = Some(done);
        Some(done)
    }
}

impl<const DEPTH: usize, const MEM: usize> PulseChannel for LoopbackChannel<DEPTH, MEM> {
    fn enable(&mut self) -> Result<(), ChannelError> {
        if self.enabled {
            return Err(ChannelError::Rejected);
        }
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), ChannelError> {
        if !self.enabled {
            return Err(ChannelError::Rejected);
        }
        self.enabled = false;
        self.pending.clear();
        Ok(())
    }

    fn transmit(
        &mut self,
        frame: &[u8],
        encoder: &mut FrameEncoder,
        loop_count: u32,
    ) -> Result<(), ChannelError> {
        if !self.enabled {
            return Err(ChannelError::Rejected);
        }
        if self.pending.len() >= self.depth {
            return Err(ChannelError::QueueFull);
        }

        let timing = *encoder.timing();
        let mut record = Transmission::new(loop_count);
        let size = self.window;
        loop {
            let window = &mut self.memory[..size];
            let Encoded { written, status } = encoder.encode(frame, window);
            record.observe(&timing, &window[..written]);
            if status == EncodeStatus::Complete {
                break;
            }
            if written == 0 {
                encoder.reset();
                return Err(ChannelError::Rejected);
            }
        }
        let repeats = u64::from(loop_count) + 1;
        let once = timing.frame_duration(frame.len());
        record.duration = Duration::from_ticks(once.as_ticks().saturating_mul(repeats));

        self.pending
            .try_push(record)
            .map_err(|_| ChannelError::QueueFull)
    }

    /// Completes pending transmissions in order while their simulated wire
    /// time fits into `timeout`.
    fn wait_completion(&mut self, timeout: Duration) -> Result<(), ChannelError> {
        if self.stalled && !self.pending.is_empty() {
            return Err(ChannelError::Timeout);
        }
        let mut budget = timeout;
        while let Some(next) = self.pending.peek(|t| t.duration) {
            let Some(left) = budget.checked_sub(next) else {
                return Err(ChannelError::Timeout);
            };
            budget = left;
            self.complete_next();
        }
        Ok(())
    }
}

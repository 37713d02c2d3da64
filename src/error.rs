use core::fmt;

/// Failure reported by a pulse channel implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// The channel or GPIO cannot be acquired (busy, missing, exhausted)
    Unavailable,
    /// The driver refused the request in its current state
    Rejected,
    /// The transmission queue has no free slot
    QueueFull,
    /// Completion was not observed within the wait bound
    Timeout,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("channel unavailable"),
            Self::Rejected => f.write_str("request rejected by driver"),
            Self::QueueFull => f.write_str("transmission queue full"),
            Self::Timeout => f.write_str("timed out waiting for completion"),
        }
    }
}

impl core::error::Error for ChannelError {}

/// Errors returned by strip operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// `led_count` was zero
    InvalidLedCount,
    /// The clock resolution cannot represent the LED timing
    InvalidTiming,
    /// The frame buffer does not fit into the strip's capacity
    Allocation { requested: usize, capacity: usize },
    /// Channel acquisition, enable or disable was refused
    Peripheral(ChannelError),
    /// Pixel index is not below `led_count`
    IndexOutOfRange { index: usize, led_count: usize },
    /// The channel did not accept the transmission
    Transmit(ChannelError),
    /// Completion was not observed in time; LED state is unknown
    Timeout,
}

impl StripError {
    /// Map a failure from a completion wait
    pub(crate) const fn from_wait(error: ChannelError) -> Self {
        match error {
            ChannelError::Timeout => Self::Timeout,
            other => Self::Transmit(other),
        }
    }
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLedCount => f.write_str("led count must be positive"),
            Self::InvalidTiming => f.write_str("clock resolution cannot represent led timing"),
            Self::Allocation {
                requested,
                capacity,
            } => write!(
                f,
                "frame buffer of {requested} bytes exceeds capacity of {capacity}"
            ),
            Self::Peripheral(err) => write!(f, "peripheral error: {err}"),
            Self::IndexOutOfRange { index, led_count } => {
                write!(f, "pixel {index} out of range for {led_count} leds")
            }
            Self::Transmit(err) => write!(f, "transmit error: {err}"),
            Self::Timeout => f.write_str("timed out waiting for transmission"),
        }
    }
}

impl core::error::Error for StripError {}

//! Per-pixel byte layout.

use crate::color::{Rgb, Rgbw};

/// Channel count and wire order of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelFormat {
    /// 3 bytes: red, green, blue
    Rgb,
    /// 3 bytes: green, red, blue (WS2812)
    Grb,
    /// 4 bytes: green, red, blue, white (SK6812-RGBW)
    #[default]
    Grbw,
}

impl ChannelFormat {
    /// Bytes per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb | Self::Grb => 3,
            Self::Grbw => 4,
        }
    }

    /// Byte offset of pixel `index` in a frame buffer
    pub const fn offset(self, index: usize) -> usize {
        index * self.channels()
    }

    /// Frame buffer size for `led_count` pixels, `None` on overflow
    pub const fn frame_len(self, led_count: usize) -> Option<usize> {
        led_count.checked_mul(self.channels())
    }
}

/// A value that can be written into one pixel slot.
///
/// `out` is exactly [`ChannelFormat::channels`] bytes long and is written
/// in wire order.
pub trait PixelColor {
    fn write_channels(&self, format: ChannelFormat, out: &mut [u8]);
}

/// Raw wire-order bytes.
///
/// Copied as-is: trailing channels the sample lacks are zeroed, extra
/// channels are dropped. The bytes are not reordered.
impl<const N: usize> PixelColor for [u8; N] {
    fn write_channels(&self, _format: ChannelFormat, out: &mut [u8]) {
        let shared = out.len().min(N);
        out[..shared].copy_from_slice(&self[..shared]);
        out[shared..].fill(0);
    }
}

impl PixelColor for Rgb {
    fn write_channels(&self, format: ChannelFormat, out: &mut [u8]) {
        match format {
            ChannelFormat::Rgb => out.copy_from_slice(&[self.r, self.g, self.b]),
            ChannelFormat::Grb => out.copy_from_slice(&[self.g, self.r, self.b]),
            ChannelFormat::Grbw => out.copy_from_slice(&[self.g, self.r, self.b, 0]),
        }
    }
}

/// White is dropped on 3-channel formats
impl PixelColor for Rgbw {
    fn write_channels(&self, format: ChannelFormat, out: &mut [u8]) {
        match format {
            ChannelFormat::Rgb => out.copy_from_slice(&[self.r, self.g, self.b]),
            ChannelFormat::Grb => out.copy_from_slice(&[self.g, self.r, self.b]),
            ChannelFormat::Grbw => out.copy_from_slice(&[self.g, self.r, self.b, self.a.0]),
        }
    }
}

impl<T: PixelColor + ?Sized> PixelColor for &T {
    fn write_channels(&self, format: ChannelFormat, out: &mut [u8]) {
        (**self).write_channels(format, out);
    }
}

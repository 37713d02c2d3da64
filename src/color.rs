//! Color types and brightness helpers.
//!
//! Channel values are plain `u8`. Helpers here clamp, so brightness math
//! done through them cannot wrap before a value reaches the frame buffer.

use smart_leds::{RGB8, RGBW, White};

use crate::math8::scale8;

pub type Rgb = RGB8;
pub type Rgbw = RGBW<u8>;

/// Build an RGBW color
pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Rgbw {
    Rgbw {
        r,
        g,
        b,
        a: White(w),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Create an RGBW color from a u32 value (0xWWRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgbw_from_u32(color: u32) -> Rgbw {
    rgbw(
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    )
}

/// Scale every channel by `brightness` (255 = unchanged)
#[inline]
pub const fn dim_rgb(color: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, brightness),
        g: scale8(color.g, brightness),
        b: scale8(color.b, brightness),
    }
}

/// Scale every channel, white included, by `brightness`
#[inline]
pub const fn dim_rgbw(color: Rgbw, brightness: u8) -> Rgbw {
    rgbw(
        scale8(color.r, brightness),
        scale8(color.g, brightness),
        scale8(color.b, brightness),
        scale8(color.a.0, brightness),
    )
}

use smart_leds::{RGBW, White};

use crate::math8::percent8;

pub type Rgbw = RGBW<u8>;

pub const BLACK: Rgbw = rgbw(0, 0, 0, 0);

/// Create an RGBW color from its four channels
pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Rgbw {
    Rgbw {
        r,
        g,
        b,
        a: White(w),
    }
}

/// Scale every channel of a color by a percentage (0-100)
#[inline]
pub const fn scale_rgbw(color: Rgbw, percent: u8) -> Rgbw {
    rgbw(
        percent8(color.r, percent),
        percent8(color.g, percent),
        percent8(color.b, percent),
        percent8(color.a.0, percent),
    )
}

use crate::color::Rgbw;
use crate::strip::PixelStrip;

mod group_scaling;

pub use group_scaling::GroupScaling;

/// Post-processing applied to a rendered frame before output
pub trait Filter {
    /// Apply the filter to a frame buffer
    fn apply(&self, frame: &mut [Rgbw]);

    /// Apply the filter to the pixels of a host strip
    fn apply_to_strip(&self, strip: &mut dyn PixelStrip);
}

//! Brightness group scaling
//!
//! Scales every pixel by the brightness of the group it belongs to.
//! Runs on every frame: no allocation, one pass over the strip.

use super::Filter;
use crate::color::{Rgbw, scale_rgbw};
use crate::groups::GroupTable;
use crate::math8::PERCENT_MAX;
use crate::strip::PixelStrip;

/// Group scaling filter over a group table
#[derive(Debug, Clone, Copy)]
pub struct GroupScaling<'a> {
    table: &'a GroupTable,
}

impl<'a> GroupScaling<'a> {
    pub const fn new(table: &'a GroupTable) -> Self {
        Self { table }
    }
}

impl Filter for GroupScaling<'_> {
    fn apply(&self, frame: &mut [Rgbw]) {
        let Some(membership) = self.table.membership() else {
            return;
        };

        for (pixel, &group) in frame.iter_mut().zip(membership) {
            let scale = self.table.scale_of(group);
            if scale == PERCENT_MAX {
                continue;
            }
            *pixel = scale_rgbw(*pixel, scale);
        }
    }

    fn apply_to_strip(&self, strip: &mut dyn PixelStrip) {
        let Some(membership) = self.table.membership() else {
            return;
        };

        let length = strip.length_physical().min(membership.len());
        for (index, &group) in membership.iter().enumerate().take(length) {
            let scale = self.table.scale_of(group);
            if scale == PERCENT_MAX {
                continue;
            }
            let color = strip.pixel_color(index);
            strip.set_pixel_color(index, scale_rgbw(color, scale));
        }
    }
}

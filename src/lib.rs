#![no_std]

extern crate alloc;

pub mod brightness_groups;
pub mod color;
pub mod config;
pub mod filter;
pub mod frame_scheduler;
pub mod groups;
pub mod math8;
pub mod metadata;
pub mod strip;
pub mod usermod;

pub use brightness_groups::{
    BrightnessGroups, BrightnessGroupsConfig, USERMOD_ID_BRIGHTNESS_GROUPS,
};
pub use filter::{Filter, GroupScaling};
pub use frame_scheduler::{FrameResult, FrameScheduler, FrameSource};
pub use groups::{AllocationError, GROUP_COUNT, GroupId, GroupTable};
pub use metadata::{MetadataOverflow, SettingsInfo};
pub use strip::{MemoryStrip, PixelStrip};
pub use usermod::{Usermod, UsermodManager};

pub use color::{Rgbw, rgbw};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgbw]);
}

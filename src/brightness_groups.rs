//! Brightness groups usermod
//!
//! Dims configurable groups of pixels on top of whatever effect is running.
//! Settings are loaded before [`Usermod::setup`]; scaling only starts once
//! setup has run, the usermod is enabled and the membership array exists.

use alloc::string::String;

use embassy_time::{Duration, Instant};
use serde_json::{Map, Value};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config;
use crate::filter::{Filter, GroupScaling};
use crate::groups::{DEFAULT_GROUP, GroupTable};
use crate::math8::PERCENT_MAX;
use crate::metadata::{MetadataOverflow, SettingsInfo};
use crate::strip::PixelStrip;
use crate::usermod::Usermod;

/// Usermod id reported to the host
pub const USERMOD_ID_BRIGHTNESS_GROUPS: u16 = 63;

/// Default interval between periodic ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the brightness groups usermod
#[derive(Debug, Clone)]
pub struct BrightnessGroupsConfig {
    /// Initial enabled state, until settings say otherwise
    pub enabled: bool,
    /// Minimum time between two periodic ticks
    pub tick_interval: Duration,
}

impl Default for BrightnessGroupsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Brightness groups usermod
#[derive(Debug, Clone)]
pub struct BrightnessGroups {
    table: GroupTable,
    enabled: bool,
    init_done: bool,
    tick_interval: Duration,
    last_tick: Instant,
}

impl BrightnessGroups {
    pub fn new(config: &BrightnessGroupsConfig) -> Self {
        Self {
            table: GroupTable::new(),
            enabled: config.enabled,
            init_done: false,
            tick_interval: config.tick_interval,
            last_tick: Instant::from_ticks(0),
        }
    }

    /// Check if setup has run
    pub const fn is_ready(&self) -> bool {
        self.init_done
    }

    pub const fn table(&self) -> &GroupTable {
        &self.table
    }

    /// Get the group table for direct edits
    pub fn table_mut(&mut self) -> &mut GroupTable {
        &mut self.table
    }

    /// Time the periodic tick last fired
    pub const fn last_tick(&self) -> Instant {
        self.last_tick
    }
}

impl Default for BrightnessGroups {
    fn default() -> Self {
        Self::new(&BrightnessGroupsConfig::default())
    }
}

impl Usermod for BrightnessGroups {
    fn setup(&mut self) {
        debug_assert_eq!(self.table.scale(DEFAULT_GROUP), Some(PERCENT_MAX));
        self.init_done = true;
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessGroups.setup] ready, {} pixels mapped",
            self.table.pixel_count()
        );
    }

    fn tick(&mut self, now: Instant, strip: &dyn PixelStrip) {
        if !self.enabled || strip.is_updating() {
            return;
        }
        if now.saturating_duration_since(self.last_tick) < self.tick_interval {
            return;
        }
        self.last_tick = now;
        #[cfg(feature = "esp32-log")]
        println!("[BrightnessGroups.tick] alive at {}ms", now.as_millis());
    }

    fn handle_overlay_draw(&mut self, strip: &mut dyn PixelStrip) {
        if !self.init_done || !self.enabled {
            return;
        }
        GroupScaling::new(&self.table).apply_to_strip(strip);
    }

    fn read_from_config(&mut self, root: &Value, strip: &dyn PixelStrip) -> bool {
        let top = config::module_object(root);
        if let Some(enabled) = config::read_enabled(top) {
            self.enabled = enabled;
        }
        config::read_groups(&mut self.table, top, strip.length_physical()).unwrap_or(false)
    }

    fn add_to_config(&self, root: &mut Map<String, Value>) {
        config::write_groups(&self.table, self.enabled, root);
    }

    fn append_config_data(&self, info: &mut SettingsInfo) -> Result<(), MetadataOverflow> {
        config::append_group_info(info)
    }

    fn enable(&mut self, enable: bool) {
        self.enabled = enable;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn id(&self) -> u16 {
        USERMOD_ID_BRIGHTNESS_GROUPS
    }
}

//! Usermod hooks
//!
//! A usermod is a set of callbacks the host invokes at fixed points of its
//! lifecycle. Usermods are registered by instance with a [`UsermodManager`],
//! which fans every hook out to all of them in registration order.

use alloc::boxed::Box;
use alloc::string::String;

use embassy_time::Instant;
use heapless::Vec;
use serde_json::{Map, Value};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::metadata::{MetadataOverflow, SettingsInfo};
use crate::strip::PixelStrip;

/// Maximum number of usermods a manager holds
pub const MAX_USERMODS: usize = 10;

/// Lifecycle hooks implemented by a usermod
///
/// Every hook except [`Usermod::id`] has a no-op default.
pub trait Usermod {
    /// Called once before the first frame
    fn setup(&mut self) {}

    /// Called on every host loop iteration. Must not block.
    fn tick(&mut self, _now: Instant, _strip: &dyn PixelStrip) {}

    /// Called once per frame after the effect rendered, before output
    fn handle_overlay_draw(&mut self, _strip: &mut dyn PixelStrip) {}

    /// Load settings from the settings root
    ///
    /// Returns `false` if settings were missing or could not be applied,
    /// in which case the host should save the current values back.
    fn read_from_config(&mut self, _root: &Value, _strip: &dyn PixelStrip) -> bool {
        true
    }

    /// Store settings into the settings root
    fn add_to_config(&self, _root: &mut Map<String, Value>) {}

    /// Describe settings fields for the settings page
    fn append_config_data(&self, _info: &mut SettingsInfo) -> Result<(), MetadataOverflow> {
        Ok(())
    }

    fn enable(&mut self, _enable: bool) {}

    fn is_enabled(&self) -> bool {
        true
    }

    /// Unique usermod id used for capability discovery
    fn id(&self) -> u16;
}

/// Registry of usermods
#[derive(Default)]
pub struct UsermodManager {
    usermods: Vec<Box<dyn Usermod>, MAX_USERMODS>,
}

impl UsermodManager {
    pub const fn new() -> Self {
        Self {
            usermods: Vec::new(),
        }
    }

    /// Register a usermod
    ///
    /// Returns the usermod if the manager is full
    pub fn register(&mut self, usermod: Box<dyn Usermod>) -> Result<(), Box<dyn Usermod>> {
        self.usermods.push(usermod).inspect_err(|_rejected| {
            #[cfg(feature = "esp32-log")]
            println!(
                "[UsermodManager.register] registry full, usermod {} rejected",
                _rejected.id()
            );
        })
    }

    pub fn len(&self) -> usize {
        self.usermods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usermods.is_empty()
    }

    /// Find a registered usermod by id
    pub fn lookup(&self, id: u16) -> Option<&dyn Usermod> {
        self.usermods
            .iter()
            .find(|usermod| usermod.id() == id)
            .map(|usermod| &**usermod)
    }

    /// Find a registered usermod by id for modification
    pub fn lookup_mut(&mut self, id: u16) -> Option<&mut (dyn Usermod + 'static)> {
        self.usermods
            .iter_mut()
            .find(|usermod| usermod.id() == id)
            .map(|usermod| &mut **usermod)
    }

    pub fn setup(&mut self) {
        for usermod in &mut self.usermods {
            usermod.setup();
        }
    }

    pub fn tick(&mut self, now: Instant, strip: &dyn PixelStrip) {
        for usermod in &mut self.usermods {
            usermod.tick(now, strip);
        }
    }

    pub fn handle_overlay_draw(&mut self, strip: &mut dyn PixelStrip) {
        for usermod in &mut self.usermods {
            usermod.handle_overlay_draw(strip);
        }
    }

    /// Load settings into every usermod
    ///
    /// Returns `true` only if every usermod loaded complete settings.
    pub fn read_from_config(&mut self, root: &Value, strip: &dyn PixelStrip) -> bool {
        let mut complete = true;
        for usermod in &mut self.usermods {
            complete &= usermod.read_from_config(root, strip);
        }
        complete
    }

    pub fn add_to_config(&self, root: &mut Map<String, Value>) {
        for usermod in &self.usermods {
            usermod.add_to_config(root);
        }
    }

    /// Collect settings metadata, stopping at the first usermod that overflows
    pub fn append_config_data(&self, info: &mut SettingsInfo) -> Result<(), MetadataOverflow> {
        for usermod in &self.usermods {
            usermod.append_config_data(info)?;
        }
        Ok(())
    }
}

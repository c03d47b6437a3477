//! Persisted settings
//!
//! Groups are stored in the host settings document under the module object:
//!
//! ```json
//! {
//!   "BrightnessGroups": {
//!     "enabled": true,
//!     "Group 1": { "scale": 50, "pixels": "1,3,5" },
//!     "Group 2": { "scale": 100, "pixels": "" }
//!   }
//! }
//! ```
//!
//! Loading is lenient: missing fields fall back to defaults and only make
//! the load report itself as incomplete, so the host can save the defaults
//! back and show them on the settings page.

use alloc::string::{String, ToString};
use core::fmt::Write;

use heapless::String as FixedString;
use serde::Deserialize;
use serde_json::{Map, Value};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::groups::codec;
use crate::groups::{AllocationError, GroupId, GroupTable, configurable_groups};
use crate::math8::PERCENT_MAX;
use crate::metadata::{MetadataOverflow, SettingsInfo};

/// Name of the module object in the settings document
pub const MODULE_NAME: &str = "BrightnessGroups";

/// Key of the enabled flag inside the module object
pub const ENABLED_KEY: &str = "enabled";

pub const SCALE_KEY: &str = "scale";
pub const PIXELS_KEY: &str = "pixels";

const SCALE_INFO: &str = "<i>Local brightness for each group between 0 and 100 percent.</i>";
const PIXELS_INFO: &str = "Comma separated pixel numbers (starting at 1) in this group. \
                           Invalid or missing pixels are left at full brightness.";

/// Key of a group object, e.g. `Group 1`
pub fn group_key(group: GroupId) -> FixedString<8> {
    let mut key = FixedString::new();
    let _ = write!(key, "Group {}", group);
    key
}

/// Key used for group objects by older documents, e.g. `group1`
fn legacy_group_key(group: GroupId) -> FixedString<8> {
    let mut key = FixedString::new();
    let _ = write!(key, "group{}", group);
    key
}

/// Scale as found in a document: integer or float
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawScale {
    Int(i64),
    Float(f64),
}

impl RawScale {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn to_percent(self) -> u8 {
        match self {
            Self::Int(value) => value.clamp(0, i64::from(PERCENT_MAX)) as u8,
            Self::Float(value) => {
                if value.is_nan() || value <= 0.0 {
                    0
                } else if value >= f64::from(PERCENT_MAX) {
                    PERCENT_MAX
                } else {
                    value as u8
                }
            }
        }
    }
}

/// One group object as found in a document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGroup {
    scale: Option<RawScale>,
    pixels: Option<String>,
}

impl RawGroup {
    fn read(top: Option<&Map<String, Value>>, group: GroupId) -> Self {
        let Some(top) = top else {
            return Self::default();
        };
        let value = top
            .get(group_key(group).as_str())
            .or_else(|| top.get(legacy_group_key(group).as_str()));
        match value {
            Some(value) => Self::deserialize(value).unwrap_or_default(),
            None => Self::default(),
        }
    }
}

/// Load group scales and membership from the module object
///
/// `top` is the module object, `None` when the document has none.
/// The membership array is allocated for `pixel_count` pixels on first use
/// and cleared before the groups are decoded, so the document replaces any
/// previous membership.
///
/// Returns `Ok(true)` when every group had both fields.
pub fn read_groups(
    table: &mut GroupTable,
    top: Option<&Map<String, Value>>,
    pixel_count: usize,
) -> Result<bool, AllocationError> {
    let mut complete = top.is_some();
    let mut membership_ready = false;

    for group in configurable_groups() {
        let raw = RawGroup::read(top, group);

        complete &= raw.scale.is_some();
        let scale = raw.scale.map_or(PERCENT_MAX, RawScale::to_percent);
        table.set_scale(group, scale);

        complete &= raw.pixels.is_some();
        if !membership_ready {
            table.allocate(pixel_count).inspect_err(|_| {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[config.read_groups] membership allocation for {} pixels failed",
                    pixel_count
                );
            })?;
            table.clear_membership();
            membership_ready = true;
        }

        codec::decode(table, group, raw.pixels.as_deref().unwrap_or_default());
    }

    #[cfg(feature = "esp32-log")]
    if !complete {
        println!("[config.read_groups] settings incomplete, defaults applied");
    }

    Ok(complete)
}

/// Read the enabled flag from the module object
pub fn read_enabled(top: Option<&Map<String, Value>>) -> Option<bool> {
    top?.get(ENABLED_KEY)?.as_bool()
}

/// Get the module object from the settings root
pub fn module_object(root: &Value) -> Option<&Map<String, Value>> {
    root.get(MODULE_NAME)?.as_object()
}

/// Write the module object, replacing any previous one
pub fn write_groups(table: &GroupTable, enabled: bool, root: &mut Map<String, Value>) {
    let mut top = Map::new();
    top.insert(ENABLED_KEY.to_string(), Value::Bool(enabled));

    for group in configurable_groups() {
        let mut entry = Map::new();
        let scale = table.scale(group).unwrap_or(PERCENT_MAX);
        entry.insert(SCALE_KEY.to_string(), Value::from(scale));
        entry.insert(
            PIXELS_KEY.to_string(),
            Value::String(codec::encode(table, group)),
        );
        top.insert(group_key(group).as_str().to_string(), Value::Object(entry));
    }

    root.insert(MODULE_NAME.to_string(), Value::Object(top));
}

/// Describe the scale and pixels field of every group
pub fn append_group_info(info: &mut SettingsInfo) -> Result<(), MetadataOverflow> {
    for group in configurable_groups() {
        info.add_info(&field_key(group, SCALE_KEY), SCALE_INFO)?;
        info.add_info(&field_key(group, PIXELS_KEY), PIXELS_INFO)?;
    }
    Ok(())
}

/// Settings page key of a group field, e.g. `BrightnessGroups:group1:scale`
fn field_key(group: GroupId, field: &str) -> FixedString<48> {
    let mut key = FixedString::new();
    let _ = write!(key, "{}:group{}:{}", MODULE_NAME, group, field);
    key
}

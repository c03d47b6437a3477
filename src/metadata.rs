//! Settings page metadata
//!
//! Usermods describe their settings fields to the host settings page as a
//! series of `addInfo('<key>',1,'<text>');` statements. The host buffer for
//! these is small, so the text is collected in a fixed-capacity string.

use core::fmt::Write;

use heapless::String;

/// Capacity of the metadata buffer in bytes
pub const METADATA_CAPACITY: usize = 3072;

/// Error returned when an entry does not fit in the metadata buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataOverflow;

/// Fixed-capacity collector of settings field descriptions
#[derive(Debug, Clone, Default)]
pub struct SettingsInfo {
    buffer: String<METADATA_CAPACITY>,
}

impl SettingsInfo {
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Append a description for a settings field
    ///
    /// Either the whole entry is written or, if it does not fit, nothing is.
    pub fn add_info(&mut self, key: &str, text: &str) -> Result<(), MetadataOverflow> {
        let mark = self.buffer.len();
        let written = write!(self.buffer, "addInfo('{}',1,'{}');", key, text);
        if written.is_err() {
            self.buffer.truncate(mark);
            return Err(MetadataOverflow);
        }
        Ok(())
    }

    /// Collected statements
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

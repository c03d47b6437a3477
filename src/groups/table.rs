use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::math8::{PERCENT_MAX, clamp_percent};

/// Group identifier. 0 is the default group, `1..=GROUP_COUNT` are configurable.
pub type GroupId = u8;

/// Number of configurable groups, not counting the default group
pub const GROUP_COUNT: usize = 4;

/// The implicit group every pixel belongs to until assigned elsewhere
pub const DEFAULT_GROUP: GroupId = 0;

/// Ids of the configurable groups, in order
#[allow(clippy::cast_possible_truncation)]
pub fn configurable_groups() -> RangeInclusive<GroupId> {
    1..=GROUP_COUNT as GroupId
}

/// Error returned when the membership array could not be allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationError(pub TryReserveError);

/// Per-pixel group membership and per-group brightness scale
///
/// Membership is allocated lazily, once, because the strip length is only
/// known after the host reports it. Every accessor is bounds checked and
/// out-of-range requests are ignored.
#[derive(Debug, Clone)]
pub struct GroupTable {
    scales: [u8; GROUP_COUNT + 1],
    membership: Option<Vec<GroupId>>,
}

impl GroupTable {
    /// Create a table with every group at full brightness and no membership
    pub const fn new() -> Self {
        Self {
            scales: [PERCENT_MAX; GROUP_COUNT + 1],
            membership: None,
        }
    }

    /// Allocate the membership array for `pixel_count` pixels
    ///
    /// Does nothing if the array already exists, whatever its size.
    pub fn allocate(&mut self, pixel_count: usize) -> Result<(), AllocationError> {
        if self.membership.is_some() {
            return Ok(());
        }

        let mut membership = Vec::new();
        membership
            .try_reserve_exact(pixel_count)
            .map_err(AllocationError)?;
        membership.resize(pixel_count, DEFAULT_GROUP);
        self.membership = Some(membership);

        Ok(())
    }

    /// Check if the membership array exists
    pub const fn is_allocated(&self) -> bool {
        self.membership.is_some()
    }

    /// Number of pixels covered by the membership array (0 until allocated)
    pub fn pixel_count(&self) -> usize {
        self.membership.as_ref().map_or(0, Vec::len)
    }

    /// Get the group of a 0-based pixel
    pub fn group(&self, pixel: usize) -> Option<GroupId> {
        self.membership.as_ref()?.get(pixel).copied()
    }

    /// Move a 0-based pixel into a group
    pub fn set_group(&mut self, pixel: usize, group: GroupId) {
        if usize::from(group) > GROUP_COUNT {
            return;
        }
        if let Some(slot) = self
            .membership
            .as_mut()
            .and_then(|membership| membership.get_mut(pixel))
        {
            *slot = group;
        }
    }

    /// Put every pixel back into the default group
    pub fn clear_membership(&mut self) {
        if let Some(membership) = self.membership.as_mut() {
            membership.fill(DEFAULT_GROUP);
        }
    }

    /// Iterate the 0-based pixels of a group in strip order
    pub fn members(&self, group: GroupId) -> impl Iterator<Item = usize> + '_ {
        self.membership
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .filter(move |&(_, &pixel_group)| pixel_group == group)
            .map(|(pixel, _)| pixel)
    }

    /// Get the brightness scale of a group
    pub fn scale(&self, group: GroupId) -> Option<u8> {
        self.scales.get(usize::from(group)).copied()
    }

    /// Set the brightness scale of a group, clamped to 0-100
    ///
    /// The default group stays at 100.
    pub fn set_scale(&mut self, group: GroupId, percent: u8) {
        if group == DEFAULT_GROUP {
            return;
        }
        if let Some(slot) = self.scales.get_mut(usize::from(group)) {
            *slot = clamp_percent(percent);
        }
    }

    /// Scale lookup for a membership entry, used on the hot path
    #[inline]
    pub(crate) fn scale_of(&self, group: GroupId) -> u8 {
        self.scales
            .get(usize::from(group))
            .copied()
            .unwrap_or(PERCENT_MAX)
    }

    pub(crate) fn membership(&self) -> Option<&[GroupId]> {
        self.membership.as_deref()
    }
}

impl Default for GroupTable {
    fn default() -> Self {
        Self::new()
    }
}

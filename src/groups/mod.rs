//! Pixel groups
//!
//! The group table owns which group every pixel belongs to and how bright
//! each group is. The codec converts one group's membership to and from its
//! persisted text form.

pub mod codec;
mod table;

pub use table::{
    AllocationError, DEFAULT_GROUP, GROUP_COUNT, GroupId, GroupTable, configurable_groups,
};

//! Text encoding of group membership
//!
//! A group is persisted as a comma separated list of 1-based pixel indices,
//! e.g. `"1,3,5"`. Decoding is tolerant: tokens that are empty, not a number,
//! zero, or beyond the strip are skipped, since the text may be hand edited
//! or come from a longer strip.

use alloc::string::String;
use core::fmt::{self, Write};

use super::table::{GROUP_COUNT, GroupId, GroupTable};

/// Separator between pixel indices
pub const DELIMITER: char = ',';

/// Encode the pixels of a group as ascending 1-based indices
pub fn encode(table: &GroupTable, group: GroupId) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = encode_into(table, group, &mut out);
    out
}

/// Encode the pixels of a group into any text sink
pub fn encode_into<W: Write>(table: &GroupTable, group: GroupId, out: &mut W) -> fmt::Result {
    for (i, pixel) in table.members(group).enumerate() {
        if i > 0 {
            out.write_char(DELIMITER)?;
        }
        write!(out, "{}", pixel + 1)?;
    }
    Ok(())
}

/// Split text into per-token parse results
///
/// Yields `None` for tokens that are not an unsigned integer.
pub fn tokens(text: &str) -> impl Iterator<Item = Option<usize>> + '_ {
    text.split(DELIMITER)
        .map(|token| token.trim().parse::<usize>().ok())
}

/// Valid 0-based pixel indices named by the text
pub fn pixel_indices(text: &str, pixel_count: usize) -> impl Iterator<Item = usize> + '_ {
    tokens(text)
        .flatten()
        .filter(move |&pixel| pixel != 0 && pixel <= pixel_count)
        .map(|pixel| pixel - 1)
}

/// Assign every pixel named by the text to a group
///
/// Returns the number of pixels assigned.
pub fn decode(table: &mut GroupTable, group: GroupId, text: &str) -> usize {
    if usize::from(group) > GROUP_COUNT {
        return 0;
    }
    let mut assigned = 0;
    for pixel in pixel_indices(text, table.pixel_count()) {
        table.set_group(pixel, group);
        assigned += 1;
    }
    assigned
}

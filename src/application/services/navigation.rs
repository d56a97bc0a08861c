//! Channel-to-channel movement over the full sidebar order.
//!
//! These work on an unwindowed plain list, so movement crosses the group
//! boundary and wraps around regardless of what is on screen.

use super::list_assembler::{RenderedEntry, SidebarList};
use crate::domain::sidebar::MatchValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Returns the entry after (or before) the current one, wrapping at the ends.
/// With no current entry the first (or last) entry is returned.
#[must_use]
pub fn step_target(list: &SidebarList, direction: Direction) -> Option<MatchValue> {
    let entries: Vec<&RenderedEntry> = list.entries().collect();
    let len = entries.len();
    if len == 0 {
        return None;
    }

    let current = entries.iter().position(|entry| entry.entry.is_current);
    let target = match (current, direction) {
        (Some(idx), Direction::Forward) => (idx + 1) % len,
        (Some(idx), Direction::Backward) => (idx + len - 1) % len,
        (None, Direction::Forward) => 0,
        (None, Direction::Backward) => len - 1,
    };

    Some(entries[target].match_value())
}

/// Returns the first entry after the current one that has unread messages or
/// mentions, wrapping around. The current entry itself is never returned.
#[must_use]
pub fn next_unread_target(list: &SidebarList) -> Option<MatchValue> {
    let entries: Vec<&RenderedEntry> = list.entries().collect();
    let len = entries.len();
    let start = entries
        .iter()
        .position(|entry| entry.entry.is_current)
        .map_or(0, |idx| idx + 1);

    (0..len)
        .map(|i| entries[(start + i) % len])
        .find(|entry| {
            !entry.entry.is_current && (entry.entry.has_unread || entry.entry.mention_count > 0)
        })
        .map(RenderedEntry::match_value)
}

//! Read-only view of chat state consumed by the sidebar engine.

use crate::domain::entities::{Channel, ChannelId, ReadState, User, UserId};

/// Snapshot of the chat-state store for one render pass.
///
/// Implementations must not change while a pass holds a reference. Every
/// lookup may fail; callers skip entries they cannot resolve.
pub trait ChatSnapshot {
    /// Ordered names of all known non-DM channels.
    fn channel_names(&self) -> &[String];

    /// Looks up a channel by name.
    fn channel_by_name(&self, name: &str) -> Option<&Channel>;

    /// Returns read state for a channel. Absence means nothing unread.
    fn read_state(&self, channel_id: ChannelId) -> Option<&ReadState>;

    /// Returns whether the channel was the previously visited one.
    fn is_recent(&self, channel_id: ChannelId) -> bool;

    /// Returns whether the channel is the one currently being viewed.
    fn is_current(&self, channel_id: ChannelId) -> bool;

    /// Returns the in-progress message draft for a channel.
    fn draft(&self, channel_id: ChannelId) -> Option<&str>;

    /// Ordered list of known users.
    fn users(&self) -> &[User];

    /// Returns the direct message channel shared with a user, if one exists.
    fn dm_channel(&self, user_id: UserId) -> Option<ChannelId>;

    /// Returns whether a non-blank draft exists for the channel.
    fn has_draft(&self, channel_id: ChannelId) -> bool {
        self.draft(channel_id)
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Returns the unread count, treating a missing read state as zero.
    fn unread_count(&self, channel_id: ChannelId) -> u32 {
        self.read_state(channel_id).map_or(0, |state| state.unread_count)
    }

    /// Returns the mention count, treating a missing read state as zero.
    fn mention_count(&self, channel_id: ChannelId) -> u32 {
        self.read_state(channel_id).map_or(0, |state| state.mention_count)
    }
}

//! Read state entity.

use serde::{Deserialize, Serialize};

use super::ChannelId;

/// Read state for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadState {
    /// Channel ID.
    pub channel_id: ChannelId,
    /// Number of messages not yet viewed.
    #[serde(default)]
    pub unread_count: u32,
    /// Number of mentions.
    #[serde(default)]
    pub mention_count: u32,
}

impl ReadState {
    /// Creates a new read state with no unread messages.
    #[must_use]
    pub const fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            unread_count: 0,
            mention_count: 0,
        }
    }

    /// Sets the unread count.
    #[must_use]
    pub const fn with_unread_count(mut self, count: u32) -> Self {
        self.unread_count = count;
        self
    }

    /// Sets the mention count.
    #[must_use]
    pub const fn with_mention_count(mut self, count: u32) -> Self {
        self.mention_count = count;
        self
    }

    /// Returns whether the channel has unread messages.
    #[must_use]
    pub const fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// Clears both counters.
    pub const fn mark_read(&mut self) {
        self.unread_count = 0;
        self.mention_count = 0;
    }
}

//! Domain layer with core entities, sidebar value types and port definitions.

/// Entity definitions.
pub mod entities;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;
/// Sidebar row, match and group value types.
pub mod sidebar;

pub use entities::{Channel, ChannelId, PresenceStatus, User, UserId};
pub use ports::ChatSnapshot;
pub use sidebar::{Entry, MatchResult, MatchValue, MatchedEntry, SidebarGroup};

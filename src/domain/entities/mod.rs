//! Domain entity definitions.

mod channel;
mod read_state;
mod user;

pub use channel::{Channel, ChannelId, ChannelKind};
pub use read_state::ReadState;
pub use user::{PresenceStatus, User, UserId};

mod channel_list;
mod footer_bar;

pub use channel_list::{ChannelList, ChannelListState, SIDEBAR_VIEWPORT};
pub use footer_bar::{FooterBar, FooterBarStyle, SidebarMode};

pub mod group_providers;
pub mod list_assembler;
pub mod match_engine;
pub mod navigation;
pub mod select_session;
pub mod window_selector;

pub use group_providers::SidebarOptions;
pub use list_assembler::{RenderedEntry, SidebarList, SidebarRow, assemble, matched_group};
pub use match_engine::find_match;
pub use navigation::{Direction, next_unread_target, step_target};
pub use select_session::SelectSession;
pub use window_selector::{select_window, window_range};

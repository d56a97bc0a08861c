//! Application layer with the sidebar engine services.

/// Matching, windowing, grouping and assembly services.
pub mod services;

pub use services::{SelectSession, SidebarList, SidebarOptions, SidebarRow, assemble};

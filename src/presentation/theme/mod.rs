//! Color theme for the sidebar.

pub mod adapter;
mod service;

pub use service::Theme;

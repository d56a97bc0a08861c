//! Chanlist - a grouped channel sidebar for terminal chat clients.
//!
//! This crate provides the sidebar list engine (match engine, group
//! providers, windowing selector and list assembler) together with a
//! terminal front end that drives it against an in-memory chat snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the sidebar engine services.
pub mod application;
/// Domain layer containing entities, sidebar types and port definitions.
pub mod domain;
/// Infrastructure layer containing configuration and snapshot adapters.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "chanlist";

//! Command handler layer.
//!
//! ## Files
//! - `mirror.rs` — catalog sync, forced installs, version listing.
//!
//! Handlers turn `Cli` flags into service calls, print the reports, and
//! decide the exit status from them.

pub mod mirror;

pub use mirror::handle_mirror_commands;

//! Types the sync pipeline passes between stages.
//!
//! ## Files
//! - `models.rs` — catalog entries, artifacts, decisions, reports, settings.
//! - `errors.rs` — `SyncError`, the error type of every service.
//! - `constants.rs` — site defaults and the built-in version table.
//!
//! Nothing here touches the network or the mirror root. `VersionTable` is the
//! one type with a construction check (label order).
//!
//! Report structs are what `--json` prints.

pub mod constants;
pub mod errors;
pub mod models;

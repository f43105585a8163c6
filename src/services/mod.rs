//! Catalog parsing, freshness decisions and mirror installs.
//!
//! ## Service map
//! - `timestamps.rs` — relative ("3 weeks ago") and absolute date parsing.
//! - `pages.rs` — queries over parsed item pages (trail, name, ZIP link).
//! - `catalog.rs` — category listing → catalog entries.
//! - `versions.rs` — version classification from the navigation trail.
//! - `artifacts.rs` — local chart lookup and superseded-format pruning.
//! - `decision.rs` — pure freshness decision.
//! - `install.rs` — item page → archive download → extraction.
//! - `sync.rs` — catalog passes and forced installs.
//! - `config.rs` — config file + CLI override merging.
//! - `logging.rs` — console + log file tracing setup.
//! - `output.rs` — JSON/text output helpers.
//!
//! Stages run listing → entries → local lookup → decision → install. The
//! parsers and `decision` are pure; filesystem writes happen only in
//! `artifacts::prune_superseded`, `install` and `logging`.

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod decision;
pub mod install;
pub mod logging;
pub mod output;
pub mod pages;
pub mod sync;
pub mod timestamps;
pub mod versions;

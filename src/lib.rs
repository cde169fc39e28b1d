//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core, autoplay, types}` so
//! binaries, tests and benches depend on a single package.

pub use blockfall_autoplay as autoplay;
pub use blockfall_core as core;
pub use blockfall_types as types;

//! Shared helpers used by the forum crates and binaries.

pub mod utils;

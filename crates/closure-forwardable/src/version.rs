//! Semantic version of this crate.

pub const MAJOR: u64 = 0;
pub const MINOR: u64 = 1;
pub const PATCH: u64 = 0;

/// `MAJOR.MINOR.PATCH`
pub const STRING: &str = env!("CARGO_PKG_VERSION");

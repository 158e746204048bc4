//! Process-wide debug flag.
//!
//! When the flag is set, errors passing through a forwarding operation keep
//! the delegation layer's own frames in their [`CallHistory`]. It is read
//! once per error and can be flipped at any time; a toggle racing with an
//! in-flight error may or may not affect that error.
//!
//! [`CallHistory`]: crate::backtrace::CallHistory

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable consulted by [`init_debug_from_env`].
pub const DEBUG_ENV_VAR: &str = "CLOSURE_FORWARDABLE_DEBUG";

static DEBUG: AtomicBool = AtomicBool::new(false);

/// Returns whether internal frames are kept in forwarded errors.
pub fn debug() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

/// Sets the flag from [`DEBUG_ENV_VAR`] if it is present.
///
/// Returns the value that was applied, or `None` when the variable is unset
/// and the flag was left alone.
pub fn init_debug_from_env() -> Option<bool> {
    let raw = std::env::var(DEBUG_ENV_VAR).ok()?;
    let enabled = parse_flag(&raw);
    log::debug!("{} = {:?}, debug {}", DEBUG_ENV_VAR, raw, enabled);
    set_debug(enabled);
    Some(enabled)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

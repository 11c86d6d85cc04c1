//! Environment isolation utilities for testing
//!
//! Tests that touch process-wide environment variables serialize on
//! [`ENV_LOCK`] so parallel test threads never observe each other's values.

use std::sync::Mutex;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with `vars` applied to the environment, then restore it
///
/// `Some(value)` sets a variable, `None` removes it. Original values are
/// restored even when `f` panics.
///
/// ```no_run
/// use latexlab_testkit::with_env_vars;
///
/// with_env_vars(&[("TMPDIR", Some("/tmp")), ("TMP", None)], || {
///     assert_eq!(std::env::var("TMPDIR").unwrap(), "/tmp");
/// });
/// ```
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let _restore = Restore {
        saved: vars
            .iter()
            .map(|(name, _)| (name.to_string(), std::env::var_os(name)))
            .collect(),
    };

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        for (name, value) in vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    f()
}

struct Restore {
    saved: Vec<(String, Option<std::ffi::OsString>)>,
}

impl Drop for Restore {
    fn drop(&mut self) {
        // SAFETY: Dropped before the ENV_LOCK guard, so access is still exclusive.
        unsafe {
            for (name, value) in &self.saved {
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
            }
        }
    }
}

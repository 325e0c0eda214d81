//! Shared test-only helpers for dpaster_core.

use std::sync::{Mutex, MutexGuard, OnceLock};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn apply(key: &str, value: Option<&str>) {
    // SAFETY: every mutation happens while `env_lock` is held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Overrides a set of environment variables for the lifetime of the guard.
///
/// Holds the process-wide env lock so parallel tests never observe each
/// other's values. Previous values are restored in reverse order on drop.
pub(crate) struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Apply `vars`, where `None` removes the variable.
    ///
    /// # Panics
    /// Panics if a previous test panicked while holding the env lock.
    pub(crate) fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock().lock().expect("env lock");
        let mut saved = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            saved.push((key.to_string(), std::env::var(key).ok()));
            apply(key, *value);
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in self.saved.iter().rev() {
            apply(key, previous.as_deref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScopedEnv;

    #[test]
    fn scoped_env_restores_previous_values() {
        let key = "DPASTER_TEST_SCOPED_ENV_RESTORE";
        {
            let _outer = ScopedEnv::new(&[(key, Some("before"))]);
            assert_eq!(std::env::var(key).ok().as_deref(), Some("before"));
        }
        assert!(std::env::var(key).is_err());
    }

    #[test]
    fn scoped_env_can_remove_variables() {
        let key = "DPASTER_TEST_SCOPED_ENV_REMOVE";
        {
            let _removed = ScopedEnv::new(&[(key, None)]);
            assert!(std::env::var(key).is_err());
        }
        assert!(std::env::var(key).is_err());
    }
}

use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serializes tests that read or write the process environment, so a
/// snapshot taken in one test never observes another test's variables.
pub(crate) fn env_guard() -> MutexGuard<'static, ()> {
    static ENV_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    ENV_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

//! Poison-tolerant mutex access.
//!
//! The only shared mutable state in the crate is caches (the color parse
//! cache) and the logger's output sink. Neither holds anything a panicking
//! thread could leave half-written in a harmful way, so a poisoned lock is
//! recovered instead of propagated.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Logger sink | [`lock_recover`] |
//! | Caches, where a recovery is worth a warning | [`lock_recover_debug`] |
//! | Test code | `.lock().unwrap()` |
//!
//! ```rust
//! use std::sync::Mutex;
//! use picker_values::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// # Panics
///
/// Never.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Like [`lock_recover`], but logs a warning naming `context` on recovery.
///
/// ```rust
/// use std::sync::Mutex;
/// use picker_values::sync::lock_recover_debug;
///
/// let mutex = Mutex::new("hello");
/// let guard = lock_recover_debug(&mutex, "color cache");
/// assert_eq!(*guard, "hello");
/// ```
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("mutex poison recovered at: {context}");
        e.into_inner()
    })
}

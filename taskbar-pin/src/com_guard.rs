//! RAII guard for COM initialization/teardown.
//!
//! Ensures `CoUninitialize` is called exactly once per successful
//! `CoInitializeEx`, even on early returns or panics.

use crate::errors::HResult;
use std::marker::PhantomData;
use windows::Win32::System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx, CoUninitialize};

/// Drop guard for COM thread initialization.
///
/// Calling [`ComGuard::new`] initializes COM in Single-Threaded Apartment
/// (STA) mode, which is what the shell's pinned-list object expects. When
/// the guard is dropped, `CoUninitialize` is called automatically.
///
/// # Thread Safety
///
/// `ComGuard` is `!Send` and `!Sync`. COM initialization is per-thread, so
/// the guard must be created and dropped on the same OS thread.
///
/// # Examples
///
/// ```no_run
/// # use taskbar_pin::ComGuard;
/// let _guard = ComGuard::new().expect("COM init");
/// // ... COM operations ...
/// // CoUninitialize called automatically on drop
/// ```
#[derive(Debug)]
pub struct ComGuard {
    /// Prevents `Send + Sync` auto-derivation. COM init is per-thread.
    _not_send: PhantomData<*mut ()>,
}

impl ComGuard {
    /// Initialize COM in STA mode.
    ///
    /// Returns `Ok(ComGuard)` on success, including `S_FALSE` (COM was
    /// already initialized on this thread), which still needs a balancing
    /// `CoUninitialize`.
    ///
    /// # Errors
    ///
    /// Returns the failing HRESULT, e.g. `RPC_E_CHANGED_MODE` when the thread
    /// already joined the MTA.
    pub fn new() -> Result<Self, HResult> {
        // SAFETY: `CoInitializeEx` is a standard Win32 FFI call with no
        // pointer arguments. The result is checked below, and
        // `CoUninitialize` is only reached through Drop of a constructed guard.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };

        if let Err(e) = hr.ok() {
            let hr = HResult::from(e);
            tracing::error!(%hr, "COM STA initialization failed");
            return Err(hr);
        }

        tracing::debug!("COM STA initialized");

        Ok(Self {
            _not_send: PhantomData,
        })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        tracing::debug!("COM STA teardown");
        // SAFETY: Paired with the successful `CoInitializeEx` in `new()`.
        // Only runs on the creating thread (!Send).
        unsafe {
            CoUninitialize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn com_guard_constructs_and_drops() {
        let guard = ComGuard::new();
        assert!(guard.is_ok(), "ComGuard::new() should succeed: {guard:?}");
    }

    #[test]
    fn com_guard_nests_on_same_thread() {
        let outer = ComGuard::new().unwrap();
        let inner = ComGuard::new();
        assert!(inner.is_ok(), "S_FALSE should be accepted: {inner:?}");
        drop(inner);
        drop(outer);
    }
}

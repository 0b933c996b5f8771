use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr::NonNull;
use windows::Win32::UI::Shell::Common::ITEMIDLIST;
use windows::Win32::UI::Shell::{ILCreateFromPathW, ILFree};
use windows::core::PCWSTR;

/// Absolute item-identifier list allocated by the shell, freed on drop.
#[derive(Debug)]
pub struct ItemIdList {
    pidl: NonNull<ITEMIDLIST>,
}

impl ItemIdList {
    /// Resolve `path` with `ILCreateFromPathW`.
    ///
    /// Returns `None` if the shell cannot resolve it, or if the path contains
    /// an interior NUL and so cannot be passed as a C string.
    pub fn from_path(path: &OsStr) -> Option<Self> {
        let mut wide: Vec<u16> = path.encode_wide().collect();
        if wide.contains(&0) {
            tracing::debug!(?path, "path contains an interior NUL");
            return None;
        }
        wide.push(0);

        // SAFETY: `wide` is NUL-terminated and outlives the call. The shell
        // copies what it needs into a freshly allocated list.
        let pidl = unsafe { ILCreateFromPathW(PCWSTR(wide.as_ptr())) };
        NonNull::new(pidl).map(|pidl| Self { pidl })
    }

    pub fn as_ptr(&self) -> *const ITEMIDLIST {
        self.pidl.as_ptr()
    }
}

impl Drop for ItemIdList {
    fn drop(&mut self) {
        tracing::debug!("freeing item-identifier list");
        // SAFETY: `pidl` came from `ILCreateFromPathW`, is non-null and is
        // freed exactly once here.
        unsafe { ILFree(Some(self.as_ptr())) };
    }
}

//! # taskbar-pin
//!
//! Pins and unpins shortcuts on the Windows taskbar through the shell's
//! private `IPinnedList3` interface.
//!
//! ## Features
//! - `test-support`: Enables `FakeShell`, a recording backend for tests

mod backend;
mod command;
mod errors;
mod provider;

#[cfg(windows)]
mod com_guard;

// Stable public API
pub use command::PinCommand;
pub use errors::{HResult, PinError, PinResult, friendly_hresult_hint};
pub use provider::{CallerTag, Operation, PinRequest, PinnedList, ShellBackend};

// Windows backend re-exports
#[cfg(windows)]
pub use backend::item_id_list::ItemIdList;
#[cfg(windows)]
pub use backend::pinned_list::{
    CLSID_TASKBAND_PIN, ComPinnedList, IID_IPINNED_LIST3, IPinnedList3, IPinnedList3_Vtbl,
    MODIFY_SLOT,
};
#[cfg(windows)]
pub use backend::shell::ComShell;
#[cfg(windows)]
pub use com_guard::ComGuard;

// Test support re-export
#[cfg(feature = "test-support")]
pub use backend::fake::{Call, FailAt, FakeShell};

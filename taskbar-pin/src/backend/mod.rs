//! Backend implementations of [`crate::ShellBackend`].
//!
//! The COM backend only exists on Windows; the recording fake is available
//! to tests and, through the `test-support` feature, to downstream crates.

#[cfg(windows)]
pub mod item_id_list;

#[cfg(windows)]
pub mod pinned_list;

#[cfg(windows)]
pub mod shell;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

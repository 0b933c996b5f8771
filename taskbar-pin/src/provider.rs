use crate::errors::HResult;
use std::ffi::{OsStr, OsString};

/// Whether the shortcut is added to or removed from the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Pin,
    Unpin,
}

impl Operation {
    /// Derive the operation from the optional mode argument.
    ///
    /// Only a mode whose first character is a lowercase `u` unpins. Every
    /// other value, including an empty one, pins.
    ///
    /// # Examples
    /// ```
    /// use std::ffi::OsStr;
    /// use taskbar_pin::Operation;
    ///
    /// assert_eq!(Operation::from_mode(None), Operation::Pin);
    /// assert_eq!(Operation::from_mode(Some(OsStr::new("u"))), Operation::Unpin);
    /// assert_eq!(Operation::from_mode(Some(OsStr::new("x"))), Operation::Pin);
    /// ```
    pub fn from_mode(mode: Option<&OsStr>) -> Self {
        match mode {
            Some(m) if m.to_string_lossy().starts_with('u') => Self::Unpin,
            _ => Self::Pin,
        }
    }

    /// Split `item` into the `(unpin, pin)` argument pair of the modify call.
    pub const fn targets<T>(self, item: &T) -> (Option<&T>, Option<&T>) {
        match self {
            Self::Pin => (None, Some(item)),
            Self::Unpin => (Some(item), None),
        }
    }
}

/// Caller identity passed to the pinned-list modify call.
///
/// The shell only accepts mutations from callers it trusts; `Explorer`
/// claims the request comes from the desktop shell itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CallerTag {
    Explorer = 4,
}

/// A validated pin/unpin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRequest {
    /// Path of the shortcut, exactly as supplied on the command line.
    pub path: OsString,
    pub operation: Operation,
}

/// Access to the OS shell, split into the three resources an invocation
/// acquires.
///
/// Every associated type releases its resource when dropped. Callers must
/// drop them in reverse order of acquisition; [`crate::PinCommand`] does so
/// by scope.
pub trait ShellBackend {
    /// Proof that the component runtime is initialized on this thread.
    type Runtime;
    /// Owned, OS-allocated item-identifier list.
    type ItemIdList;
    /// Reference-counted handle to the private pinned-list interface.
    type PinnedList: PinnedList<ItemIdList = Self::ItemIdList>;

    /// Initialize the component runtime for the calling thread.
    fn initialize(&self) -> Result<Self::Runtime, HResult>;

    /// Resolve a filesystem path into an absolute item-identifier list.
    ///
    /// Returns `None` when the shell cannot resolve the path.
    fn resolve_path(&self, runtime: &Self::Runtime, path: &OsStr) -> Option<Self::ItemIdList>;

    /// Instantiate the pinned-list object and obtain its private interface.
    fn create_pinned_list(&self, runtime: &Self::Runtime) -> Result<Self::PinnedList, HResult>;
}

/// The only capability exposed from the private pinned-list interface.
pub trait PinnedList {
    type ItemIdList;

    /// Remove `unpin` and/or add `pin` to the taskbar's pinned list.
    fn modify(
        &self,
        unpin: Option<&Self::ItemIdList>,
        pin: Option<&Self::ItemIdList>,
        caller: CallerTag,
    ) -> Result<(), HResult>;
}

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pin/unpin operations.
pub type PinResult<T> = Result<T, PinError>;

/// Raw 32-bit COM status code as returned by the shell.
///
/// Kept independent of `windows::core::HRESULT` so the command logic and its
/// test doubles build on every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub const E_NOTIMPL: Self = Self(0x8000_4001_u32 as i32);
    pub const E_NOINTERFACE: Self = Self(0x8000_4002_u32 as i32);
    pub const E_FAIL: Self = Self(0x8000_4005_u32 as i32);
    pub const E_ACCESSDENIED: Self = Self(0x8007_0005_u32 as i32);
    pub const E_INVALIDARG: Self = Self(0x8007_0057_u32 as i32);
    pub const REGDB_E_CLASSNOTREG: Self = Self(0x8004_0154_u32 as i32);
    pub const CO_E_SERVER_EXEC_FAILURE: Self = Self(0x8008_0005_u32 as i32);
    pub const RPC_E_CHANGED_MODE: Self = Self(0x8001_0106_u32 as i32);

    /// Bit pattern of the code, for hex display and table lookups.
    #[allow(clippy::cast_sign_loss)]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }

    /// Severity bit set, as `FAILED()` tests it.
    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.as_u32())?;
        if let Some(hint) = friendly_hresult_hint(*self) {
            write!(f, " ({hint})")?;
        } else if let Some(message) = system_message(*self) {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

/// System text for codes without a curated hint.
#[cfg(windows)]
fn system_message(hr: HResult) -> Option<String> {
    // Error output is one line, so fold any line breaks in the system text.
    let message = windows::core::HRESULT::from(hr).message();
    let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
    let message = message.trim_end_matches('.');
    (!message.is_empty()).then(|| message.to_owned())
}

#[cfg(not(windows))]
fn system_message(_hr: HResult) -> Option<String> {
    None
}

#[cfg(windows)]
impl From<windows::core::Error> for HResult {
    fn from(err: windows::core::Error) -> Self {
        Self::from(err.code())
    }
}

#[cfg(windows)]
impl From<windows::core::HRESULT> for HResult {
    fn from(hr: windows::core::HRESULT) -> Self {
        Self(hr.0)
    }
}

#[cfg(windows)]
impl From<HResult> for windows::core::HRESULT {
    fn from(hr: HResult) -> Self {
        Self(hr.0)
    }
}

/// Maps the COM failures this tool realistically sees to one-line hints.
///
/// # Examples
/// ```
/// use taskbar_pin::{HResult, friendly_hresult_hint};
///
/// assert_eq!(
///     friendly_hresult_hint(HResult::REGDB_E_CLASSNOTREG),
///     Some("Class is not registered on this machine"),
/// );
/// assert_eq!(friendly_hresult_hint(HResult(0x1234)), None);
/// ```
pub fn friendly_hresult_hint(hr: HResult) -> Option<&'static str> {
    match hr.as_u32() {
        0x8004_0154 => Some("Class is not registered on this machine"),
        0x8000_4002 => {
            Some("Interface not supported - the shell's pinned-list layout may have changed")
        }
        0x8007_0005 => Some("Access denied"),
        0x8008_0005 => Some("Server process failed to start"),
        0x8001_0106 => Some("COM already initialized on this thread with another apartment"),
        0x8000_4001 => Some("Not implemented"),
        0x8007_0057 => Some("Invalid argument"),
        0x8000_4005 => Some("Unspecified failure"),
        _ => None,
    }
}

/// Terminal failures of a pin/unpin invocation.
///
/// Each variant maps to one process exit code; see [`PinError::exit_code`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PinError {
    /// Malformed invocation, detected before any resource is acquired.
    #[error("wrong number of arguments")]
    Usage,

    /// The COM runtime could not be initialized for this thread.
    #[error("CoInitialize failed: {0}")]
    RuntimeInit(HResult),

    /// The path could not be turned into an item-identifier list.
    #[error("ILCreateFromPathW failed: {}", .0.display())]
    Resolve(PathBuf),

    /// The private pinned-list object could not be instantiated.
    #[error("CoCreateInstance failed: {0}")]
    Create(HResult),

    /// The shell rejected the pin/unpin mutation.
    #[error("IPinnedList3::Modify failed: {0}")]
    Modify(HResult),
}

impl PinError {
    pub const EXIT_USAGE: i32 = -1;
    pub const EXIT_SUCCESS: i32 = 0;
    pub const EXIT_RUNTIME_INIT: i32 = 1;
    pub const EXIT_RESOLVE: i32 = 2;
    pub const EXIT_CREATE: i32 = 3;
    pub const EXIT_MODIFY: i32 = 4;

    /// Process exit code associated with this failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage => Self::EXIT_USAGE,
            Self::RuntimeInit(_) => Self::EXIT_RUNTIME_INIT,
            Self::Resolve(_) => Self::EXIT_RESOLVE,
            Self::Create(_) => Self::EXIT_CREATE,
            Self::Modify(_) => Self::EXIT_MODIFY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_match_table() {
        assert_eq!(PinError::Usage.exit_code(), -1);
        assert_eq!(PinError::RuntimeInit(HResult::E_FAIL).exit_code(), 1);
        assert_eq!(PinError::Resolve(PathBuf::from("x")).exit_code(), 2);
        assert_eq!(PinError::Create(HResult::E_FAIL).exit_code(), 3);
        assert_eq!(PinError::Modify(HResult::E_FAIL).exit_code(), 4);
    }

    #[test]
    fn test_hresult_display_with_hint() {
        assert_eq!(
            HResult::REGDB_E_CLASSNOTREG.to_string(),
            "0x80040154 (Class is not registered on this machine)"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_hresult_display_without_hint() {
        assert_eq!(HResult(0x8000_FFFF_u32 as i32).to_string(), "0x8000FFFF");
    }

    #[cfg(windows)]
    #[test]
    fn test_hresult_display_falls_back_to_system_message() {
        // ERROR_FILE_NOT_FOUND has no curated hint.
        let text = HResult(0x8007_0002_u32 as i32).to_string();
        assert!(text.starts_with("0x80070002 ("), "{text}");
        assert!(text.ends_with(')'), "{text}");
    }

    #[cfg(windows)]
    #[test]
    fn test_hresult_converts_with_windows_hresult() {
        let hr = windows::core::HRESULT::from(HResult::E_ACCESSDENIED);
        assert_eq!(hr, windows::Win32::Foundation::E_ACCESSDENIED);
        assert!(hr.is_err());
        assert_eq!(HResult::from(hr), HResult::E_ACCESSDENIED);
    }

    #[test]
    fn test_hresult_failure_bit() {
        assert!(HResult::E_FAIL.is_failure());
        assert!(!HResult(0).is_failure());
        assert!(!HResult(1).is_failure()); // S_FALSE
    }

    #[test]
    fn test_error_messages_name_the_failing_call() {
        let err = PinError::Create(HResult::REGDB_E_CLASSNOTREG);
        assert_eq!(
            err.to_string(),
            "CoCreateInstance failed: 0x80040154 (Class is not registered on this machine)"
        );

        let err = PinError::Resolve(PathBuf::from(r"C:\missing\app.lnk"));
        assert_eq!(err.to_string(), r"ILCreateFromPathW failed: C:\missing\app.lnk");

        let err = PinError::Modify(HResult::E_ACCESSDENIED);
        assert!(err.to_string().starts_with("IPinnedList3::Modify failed: 0x80070005"));
    }
}

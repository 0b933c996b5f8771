use crate::errors::{PinError, PinResult};
use crate::provider::{CallerTag, PinRequest, PinnedList, ShellBackend};
use std::path::PathBuf;

/// Runs a single pin/unpin request against a [`ShellBackend`].
///
/// Each OS call is attempted exactly once. Resources are held in locals, so
/// every exit path releases them in reverse order of acquisition: the
/// pinned-list interface first, then the item-identifier list, then the
/// runtime.
#[derive(Debug)]
pub struct PinCommand<'a, B: ShellBackend> {
    backend: &'a B,
}

impl<'a, B: ShellBackend> PinCommand<'a, B> {
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Execute `request`.
    ///
    /// # Errors
    ///
    /// Returns the [`PinError`] of the first stage that failed.
    pub fn execute(&self, request: &PinRequest) -> PinResult<()> {
        let runtime = self.backend.initialize().map_err(|hr| {
            tracing::error!(%hr, "component runtime initialization failed");
            PinError::RuntimeInit(hr)
        })?;
        tracing::debug!("component runtime initialized");

        let Some(item) = self.backend.resolve_path(&runtime, &request.path) else {
            tracing::error!(path = ?request.path, "path did not resolve to an item-identifier list");
            return Err(PinError::Resolve(PathBuf::from(&request.path)));
        };
        tracing::debug!(path = ?request.path, "path resolved");

        let pinned_list = self.backend.create_pinned_list(&runtime).map_err(|hr| {
            tracing::error!(%hr, "pinned-list instantiation failed");
            PinError::Create(hr)
        })?;
        tracing::debug!("pinned-list interface created");

        let (unpin, pin) = request.operation.targets(&item);
        tracing::debug!(operation = ?request.operation, "modifying pinned list");
        let outcome = pinned_list.modify(unpin, pin, CallerTag::Explorer);
        drop(pinned_list);

        outcome.map_err(|hr| {
            tracing::error!(%hr, operation = ?request.operation, "pinned-list modify failed");
            PinError::Modify(hr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{Call, FailAt, FakeShell};
    use crate::errors::HResult;
    use crate::provider::Operation;
    use std::ffi::OsString;

    fn request(operation: Operation) -> PinRequest {
        PinRequest {
            path: OsString::from(r"C:\Users\me\Desktop\App.lnk"),
            operation,
        }
    }

    #[test]
    fn test_pin_success_releases_in_reverse_order() {
        let shell = FakeShell::new();
        let result = PinCommand::new(&shell).execute(&request(Operation::Pin));
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(
            shell.calls(),
            vec![
                Call::Initialize,
                Call::ResolvePath(r"C:\Users\me\Desktop\App.lnk".into()),
                Call::CreatePinnedList,
                Call::Modify {
                    unpin: None,
                    pin: Some(1),
                    caller: CallerTag::Explorer,
                },
                Call::ReleasePinnedList,
                Call::FreeItemIdList(1),
                Call::Uninitialize,
            ]
        );
    }

    #[test]
    fn test_unpin_passes_item_as_unpin_target() {
        let shell = FakeShell::new();
        PinCommand::new(&shell)
            .execute(&request(Operation::Unpin))
            .unwrap();
        assert!(shell.calls().contains(&Call::Modify {
            unpin: Some(1),
            pin: None,
            caller: CallerTag::Explorer,
        }));
    }

    #[test]
    fn test_runtime_failure_touches_nothing_else() {
        let shell = FakeShell::failing(FailAt::Initialize(HResult::E_FAIL));
        let err = PinCommand::new(&shell)
            .execute(&request(Operation::Pin))
            .unwrap_err();
        assert!(matches!(err, PinError::RuntimeInit(HResult::E_FAIL)));
        assert_eq!(shell.calls(), vec![Call::Initialize]);
    }

    #[test]
    fn test_resolve_failure_releases_runtime() {
        let shell = FakeShell::failing(FailAt::ResolvePath);
        let err = PinCommand::new(&shell)
            .execute(&request(Operation::Pin))
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            shell.calls(),
            vec![
                Call::Initialize,
                Call::ResolvePath(r"C:\Users\me\Desktop\App.lnk".into()),
                Call::Uninitialize,
            ]
        );
    }

    #[test]
    fn test_create_failure_releases_item_then_runtime() {
        let shell = FakeShell::failing(FailAt::CreatePinnedList(HResult::REGDB_E_CLASSNOTREG));
        let err = PinCommand::new(&shell)
            .execute(&request(Operation::Pin))
            .unwrap_err();
        assert!(matches!(err, PinError::Create(HResult::REGDB_E_CLASSNOTREG)));
        assert_eq!(
            shell.calls(),
            vec![
                Call::Initialize,
                Call::ResolvePath(r"C:\Users\me\Desktop\App.lnk".into()),
                Call::CreatePinnedList,
                Call::FreeItemIdList(1),
                Call::Uninitialize,
            ]
        );
    }

    #[test]
    fn test_modify_failure_still_releases_interface_once() {
        let shell = FakeShell::failing(FailAt::Modify(HResult::E_ACCESSDENIED));
        let err = PinCommand::new(&shell)
            .execute(&request(Operation::Unpin))
            .unwrap_err();
        assert!(matches!(err, PinError::Modify(HResult::E_ACCESSDENIED)));
        let calls = shell.calls();
        assert_eq!(
            calls
                .iter()
                .filter(|c| **c == Call::ReleasePinnedList)
                .count(),
            1
        );
        assert_eq!(
            &calls[3..],
            &[
                Call::Modify {
                    unpin: Some(1),
                    pin: None,
                    caller: CallerTag::Explorer,
                },
                Call::ReleasePinnedList,
                Call::FreeItemIdList(1),
                Call::Uninitialize,
            ]
        );
    }

    #[test]
    fn test_every_acquire_has_one_release() {
        let shell = FakeShell::new();
        PinCommand::new(&shell)
            .execute(&request(Operation::Pin))
            .unwrap();
        assert_eq!(shell.acquired(), 3);
        assert_eq!(shell.released(), 3);
    }
}

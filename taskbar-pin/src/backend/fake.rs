//! Recording [`ShellBackend`] for tests.
//!
//! Every acquire, release and modify call is appended to a shared log in the
//! order it happens, so tests can assert both which OS calls were made and
//! that releases run in reverse order of acquisition.

use crate::errors::HResult;
use crate::provider::{CallerTag, PinnedList, ShellBackend};
use std::cell::{Cell, RefCell};
use std::ffi::{OsStr, OsString};
use std::rc::Rc;

/// One observed interaction with the fake shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialize,
    Uninitialize,
    ResolvePath(OsString),
    /// Item-identifier list with the given id was freed.
    FreeItemIdList(u32),
    CreatePinnedList,
    Modify {
        unpin: Option<u32>,
        pin: Option<u32>,
        caller: CallerTag,
    },
    ReleasePinnedList,
}

impl Call {
    const fn is_acquire(&self) -> bool {
        matches!(self, Self::Initialize | Self::ResolvePath(_) | Self::CreatePinnedList)
    }

    const fn is_release(&self) -> bool {
        matches!(
            self,
            Self::Uninitialize | Self::FreeItemIdList(_) | Self::ReleasePinnedList
        )
    }
}

/// Stage at which the fake shell reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Initialize(HResult),
    ResolvePath,
    CreatePinnedList(HResult),
    Modify(HResult),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default)]
pub struct FakeShell {
    log: CallLog,
    fail_at: Option<FailAt>,
    next_item: Cell<u32>,
}

impl FakeShell {
    /// A shell on which every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shell that fails at `stage`.
    pub fn failing(stage: FailAt) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::default()
        }
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    /// Number of successfully acquired resources.
    ///
    /// A failed resolve is logged but acquires nothing.
    pub fn acquired(&self) -> usize {
        let calls = self.log.borrow();
        let attempts = calls.iter().filter(|c| c.is_acquire()).count();
        let failed = match self.fail_at {
            Some(FailAt::Initialize(_) | FailAt::ResolvePath | FailAt::CreatePinnedList(_)) => 1,
            _ => 0,
        };
        attempts.saturating_sub(failed)
    }

    pub fn released(&self) -> usize {
        self.log.borrow().iter().filter(|c| c.is_release()).count()
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

#[derive(Debug)]
pub struct FakeRuntime {
    log: CallLog,
}

impl Drop for FakeRuntime {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Uninitialize);
    }
}

#[derive(Debug)]
pub struct FakeItemIdList {
    id: u32,
    log: CallLog,
}

impl Drop for FakeItemIdList {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::FreeItemIdList(self.id));
    }
}

#[derive(Debug)]
pub struct FakePinnedList {
    log: CallLog,
    modify_error: Option<HResult>,
}

impl Drop for FakePinnedList {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::ReleasePinnedList);
    }
}

impl PinnedList for FakePinnedList {
    type ItemIdList = FakeItemIdList;

    fn modify(
        &self,
        unpin: Option<&FakeItemIdList>,
        pin: Option<&FakeItemIdList>,
        caller: CallerTag,
    ) -> Result<(), HResult> {
        self.log.borrow_mut().push(Call::Modify {
            unpin: unpin.map(|i| i.id),
            pin: pin.map(|i| i.id),
            caller,
        });
        self.modify_error.map_or(Ok(()), Err)
    }
}

impl ShellBackend for FakeShell {
    type Runtime = FakeRuntime;
    type ItemIdList = FakeItemIdList;
    type PinnedList = FakePinnedList;

    fn initialize(&self) -> Result<FakeRuntime, HResult> {
        self.record(Call::Initialize);
        if let Some(FailAt::Initialize(hr)) = self.fail_at {
            return Err(hr);
        }
        Ok(FakeRuntime {
            log: Rc::clone(&self.log),
        })
    }

    fn resolve_path(&self, _runtime: &FakeRuntime, path: &OsStr) -> Option<FakeItemIdList> {
        self.record(Call::ResolvePath(path.to_os_string()));
        if self.fail_at == Some(FailAt::ResolvePath) {
            return None;
        }
        let id = self.next_item.get() + 1;
        self.next_item.set(id);
        Some(FakeItemIdList {
            id,
            log: Rc::clone(&self.log),
        })
    }

    fn create_pinned_list(&self, _runtime: &FakeRuntime) -> Result<FakePinnedList, HResult> {
        self.record(Call::CreatePinnedList);
        if let Some(FailAt::CreatePinnedList(hr)) = self.fail_at {
            return Err(hr);
        }
        let modify_error = match self.fail_at {
            Some(FailAt::Modify(hr)) => Some(hr),
            _ => None,
        };
        Ok(FakePinnedList {
            log: Rc::clone(&self.log),
            modify_error,
        })
    }
}

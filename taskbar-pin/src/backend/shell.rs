use super::item_id_list::ItemIdList;
use super::pinned_list::ComPinnedList;
use crate::com_guard::ComGuard;
use crate::errors::HResult;
use crate::provider::ShellBackend;
use std::ffi::OsStr;

/// [`ShellBackend`] backed by the real Windows shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComShell;

impl ShellBackend for ComShell {
    type Runtime = ComGuard;
    type ItemIdList = ItemIdList;
    type PinnedList = ComPinnedList;

    fn initialize(&self) -> Result<ComGuard, HResult> {
        ComGuard::new()
    }

    fn resolve_path(&self, _runtime: &ComGuard, path: &OsStr) -> Option<ItemIdList> {
        ItemIdList::from_path(path)
    }

    fn create_pinned_list(&self, _runtime: &ComGuard) -> Result<ComPinnedList, HResult> {
        ComPinnedList::create()
    }
}

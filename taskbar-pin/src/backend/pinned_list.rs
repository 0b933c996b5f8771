//! Binary layout of the shell's undocumented `IPinnedList3` interface.
//!
//! No SDK header publishes this interface. The vtable below mirrors the
//! layout shipped by Windows 10 and 11: IUnknown's three slots, thirteen
//! slots this crate never calls, then `Modify` at slot 16. If a future
//! shell moves `Modify`, this file is the only place to change.

#![allow(non_snake_case, non_camel_case_types)]

use super::item_id_list::ItemIdList;
use crate::errors::HResult;
use crate::provider::{CallerTag, PinnedList};
use std::ffi::c_void;
use std::mem::{offset_of, size_of};
use windows::Win32::System::Com::{CLSCTX_ALL, CoCreateInstance};
use windows::Win32::UI::Shell::Common::ITEMIDLIST;
use windows::core::{GUID, HRESULT, IUnknown, IUnknown_Vtbl, Interface};

/// `CLSID_TaskbandPin`.
pub const CLSID_TASKBAND_PIN: GUID = GUID::from_u128(0x90aa_3a4e_1cba_4233_b8bb_5357_73d4_8449);

/// `IID_IPinnedList3`.
pub const IID_IPINNED_LIST3: GUID = GUID::from_u128(0x0dd7_9ae2_d156_45d4_9eeb_3b54_9769_e940);

/// Vtable index of `Modify`.
pub const MODIFY_SLOT: usize = 16;

const OPAQUE_SLOTS: usize = MODIFY_SLOT - 3;

#[repr(C)]
pub struct IPinnedList3_Vtbl {
    pub base__: IUnknown_Vtbl,
    _opaque: [*const c_void; OPAQUE_SLOTS],
    pub Modify: unsafe extern "system" fn(
        this: *mut c_void,
        unpin: *const ITEMIDLIST,
        pin: *const ITEMIDLIST,
        caller: i32,
    ) -> HRESULT,
}

const _: () = assert!(offset_of!(IPinnedList3_Vtbl, Modify) == MODIFY_SLOT * size_of::<usize>());

/// Reference-counted `IPinnedList3` pointer. Dropping it calls `Release`.
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IPinnedList3(IUnknown);

// SAFETY: `IPinnedList3` is a transparent wrapper over an interface pointer
// whose vtable starts with IUnknown's and matches `IPinnedList3_Vtbl` for
// objects returned under `IID_IPINNED_LIST3`.
unsafe impl Interface for IPinnedList3 {
    type Vtable = IPinnedList3_Vtbl;
    const IID: GUID = IID_IPINNED_LIST3;
}

/// Capability wrapper that only exposes `Modify` (and `Release` via drop).
#[derive(Debug)]
pub struct ComPinnedList {
    inner: IPinnedList3,
}

impl ComPinnedList {
    /// Instantiate `CLSID_TaskbandPin` and request `IPinnedList3`.
    ///
    /// Every server context is allowed, so the shell may activate the
    /// object out of process.
    pub fn create() -> Result<Self, HResult> {
        // SAFETY: COM is initialized on this thread by the caller's runtime
        // guard. The CLSID and IID are constants and the returned pointer is
        // owned by `IPinnedList3`.
        let inner: IPinnedList3 = unsafe { CoCreateInstance(&CLSID_TASKBAND_PIN, None, CLSCTX_ALL) }
            .map_err(HResult::from)?;
        Ok(Self { inner })
    }
}

impl Drop for ComPinnedList {
    fn drop(&mut self) {
        tracing::debug!("releasing IPinnedList3");
    }
}

impl PinnedList for ComPinnedList {
    type ItemIdList = ItemIdList;

    fn modify(
        &self,
        unpin: Option<&ItemIdList>,
        pin: Option<&ItemIdList>,
        caller: CallerTag,
    ) -> Result<(), HResult> {
        let unpin = unpin.map_or(std::ptr::null(), ItemIdList::as_ptr);
        let pin = pin.map_or(std::ptr::null(), ItemIdList::as_ptr);
        // SAFETY: `inner` is a live `IPinnedList3` pointer and its vtable
        // layout is the one declared above. Both item lists are either null
        // or borrowed for the duration of the call.
        let hr = unsafe {
            (Interface::vtable(&self.inner).Modify)(
                Interface::as_raw(&self.inner),
                unpin,
                pin,
                caller as i32,
            )
        };
        hr.ok().map_err(HResult::from)
    }
}

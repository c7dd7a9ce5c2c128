//! Single-instance enforcement via a named mutex.
//!
//! Two bars fighting over the appbar reservation and the native taskbar's
//! visibility would leave the desktop in a scrambled state, so a second
//! launch is refused up front.

use zocalo_core::ShellResult;

use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE};
use windows::Win32::System::Threading::CreateMutexW;
use windows::core::w;

/// Holds the named mutex for the lifetime of the process.
pub struct SingleInstance {
    handle: HANDLE,
}

/// Tries to become the single running instance.
///
/// Returns `Ok(None)` when another instance already holds the mutex.
pub fn acquire() -> ShellResult<Option<SingleInstance>> {
    // SAFETY: CreateMutexW with a static name; the handle is closed in Drop.
    let handle = unsafe { CreateMutexW(None, true, w!("ZocaloShellMutex"))? };

    // SAFETY: GetLastError reflects the CreateMutexW call just made on
    // this thread.
    if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
        unsafe {
            let _ = CloseHandle(handle);
        }
        return Ok(None);
    }

    Ok(Some(SingleInstance { handle }))
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by acquire() and not closed since.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

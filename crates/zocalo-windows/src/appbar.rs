//! Screen reservation (appbar) protocol client.
//!
//! Negotiates with the Windows shell so the bar's rectangle along the
//! bottom edge is treated as reserved space that maximized windows do not
//! overlap, and toggles visibility of the native taskbar.

use std::mem;

use zocalo_core::{Rect, ShellResult, log_info, log_warn};

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::Shell::{
    ABE_BOTTOM, ABM_NEW, ABM_QUERYPOS, ABM_REMOVE, ABM_SETPOS, APPBARDATA, SHAppBarMessage,
};
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, SW_HIDE, SW_SHOW, ShowWindow};
use windows::core::{PCWSTR, w};

/// A live bottom-edge reservation owned by the bar window.
///
/// Unregistering exactly once is part of the shutdown contract; `Drop` is
/// the backstop for paths that never reach the explicit teardown step, so
/// a quick restart does not race a stale reservation.
pub struct AppBar {
    hwnd: HWND,
    registered: bool,
}

impl AppBar {
    /// Registers the given rectangle as a bottom-edge appbar.
    ///
    /// Follows the protocol's three-message handshake: announce the bar
    /// (`ABM_NEW`), let the shell adjust the proposed rectangle
    /// (`ABM_QUERYPOS`), then commit the adjusted position (`ABM_SETPOS`).
    /// The shell may move the strip upward when another appbar already
    /// holds the bottom edge; the bar keeps its height either way.
    pub fn register(hwnd: HWND, rect: Rect) -> ShellResult<Self> {
        let mut data = appbar_data(hwnd);
        data.uEdge = ABE_BOTTOM;
        data.rc = RECT {
            left: rect.x,
            top: rect.y,
            right: rect.right(),
            bottom: rect.bottom(),
        };

        // SAFETY: SHAppBarMessage reads/writes the APPBARDATA we own for
        // the duration of each synchronous call.
        unsafe {
            if SHAppBarMessage(ABM_NEW, &mut data) == 0 {
                return Err("shell rejected the appbar registration".into());
            }

            SHAppBarMessage(ABM_QUERYPOS, &mut data);
            data.rc.top = data.rc.bottom - rect.height;
            SHAppBarMessage(ABM_SETPOS, &mut data);
        }

        log_info!(
            "appbar registered at ({}, {}) {}x{}",
            data.rc.left,
            data.rc.top,
            data.rc.right - data.rc.left,
            data.rc.bottom - data.rc.top
        );

        Ok(Self {
            hwnd,
            registered: true,
        })
    }

    /// Removes the reservation. Safe to call more than once; only the
    /// first call talks to the shell.
    pub fn unregister(&mut self) {
        if !self.registered {
            return;
        }
        self.registered = false;

        let mut data = appbar_data(self.hwnd);
        // SAFETY: as in register().
        unsafe {
            SHAppBarMessage(ABM_REMOVE, &mut data);
        }
        log_info!("appbar unregistered");
    }
}

impl Drop for AppBar {
    fn drop(&mut self) {
        self.unregister();
    }
}

fn appbar_data(hwnd: HWND) -> APPBARDATA {
    APPBARDATA {
        cbSize: mem::size_of::<APPBARDATA>() as u32,
        hWnd: hwnd,
        ..Default::default()
    }
}

/// Hides the native taskbar. Returns `false` when it cannot be found —
/// some configurations run without one, and the caller should surface
/// that as a degraded-mode condition rather than assume it is fine.
pub fn hide_native_taskbar() -> bool {
    set_native_taskbar_visible(false)
}

/// Restores the native taskbar. Called on every shutdown path, even when
/// startup only partially succeeded, so the user is never left without
/// any taskbar at all.
pub fn show_native_taskbar() -> bool {
    set_native_taskbar_visible(true)
}

fn set_native_taskbar_visible(visible: bool) -> bool {
    match native_taskbar() {
        Some(taskbar) => {
            // SAFETY: ShowWindow is safe with a valid HWND.
            unsafe {
                let _ = ShowWindow(taskbar, if visible { SW_SHOW } else { SW_HIDE });
            }
            true
        }
        None => {
            log_warn!("native taskbar window (Shell_TrayWnd) not found");
            false
        }
    }
}

/// Locates the native taskbar by its well-known window class.
fn native_taskbar() -> Option<HWND> {
    // SAFETY: FindWindowW is a read-only lookup.
    unsafe { FindWindowW(w!("Shell_TrayWnd"), PCWSTR::null()) }
        .ok()
        .filter(|h| !h.is_invalid())
}

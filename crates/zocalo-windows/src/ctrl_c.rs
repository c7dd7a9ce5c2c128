//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.
//!
//! When the bar is started from a console, an interrupt must take the
//! clean shutdown path — unregistering the reservation and restoring the
//! native taskbar — so the handler posts `WM_CLOSE` to the bar window
//! instead of letting the process die mid-state.

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Console::{CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::Win32::UI::WindowsAndMessaging::{PostMessageW, WM_CLOSE};

/// Registers a Ctrl+C handler that closes the given bar window.
pub fn set_handler(bar_hwnd: usize) {
    if BAR_HWND.set(bar_hwnd).is_err() {
        return; // already registered
    }
    // SAFETY: SetConsoleCtrlHandler with a static callback.
    let _ = unsafe { SetConsoleCtrlHandler(Some(handler), true) };
}

/// Target window — written once by `set_handler`, read by the callback.
static BAR_HWND: std::sync::OnceLock<usize> = std::sync::OnceLock::new();

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if ctrl_type == CTRL_C_EVENT
        && let Some(&hwnd) = BAR_HWND.get()
    {
        // SAFETY: PostMessageW is safe from any thread, including the
        // console control thread this callback runs on.
        unsafe {
            let _ = PostMessageW(
                Some(HWND(hwnd as *mut _)),
                WM_CLOSE,
                WPARAM(0),
                LPARAM(0),
            );
        }
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}

use zocalo_core::{ShellResult, WindowInfo};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::window::Window;

/// Takes a snapshot of every top-level window that wants a taskbar entry.
///
/// This is the registry's pull surface: the shell calls it once at startup
/// to seed the mirror, before live notifications take over. Minimized
/// windows are included — they keep their taskbar entry.
pub fn snapshot() -> ShellResult<Vec<WindowInfo>> {
    let mut windows: Vec<WindowInfo> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<WindowInfo> to collect results. This is
    // safe because EnumWindows runs synchronously — the Vec outlives it.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )?;
    }

    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration. Win32 can't call Rust closures
/// directly, so user data travels through the `LPARAM`.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec<WindowInfo> pointer passed by snapshot().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowInfo>) };

    let window = Window::new(hwnd);
    if window.is_taskbar_window() {
        windows.push(window.info());
    }

    BOOL(1) // TRUE — continue enumerating
}

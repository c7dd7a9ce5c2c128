use zocalo_core::WindowInfo;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetForegroundWindow, GetWindow, GetWindowLongPtrW,
    GetWindowTextLengthW, GetWindowTextW, IsWindowVisible, SW_RESTORE, SetForegroundWindow,
    ShowWindow, WS_CAPTION, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
};

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle — a number that identifies a window to the OS.
/// This struct holds that handle and queries the OS lazily for metadata.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a new `Window` from a raw handle value (pointer-sized integer).
    pub fn from_raw(handle: usize) -> Self {
        Self {
            hwnd: HWND(handle as *mut _),
        }
    }

    /// Returns the raw window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Returns the handle as a pointer-sized integer.
    pub fn raw(&self) -> usize {
        self.hwnd.0 as usize
    }

    /// Returns the window title, or an empty string for untitled windows.
    pub fn title(&self) -> String {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW read window text
        // with a valid HWND without modifying state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length == 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied as usize])
        }
    }

    /// Returns whether this window wants a taskbar entry.
    ///
    /// Mirrors the shell's own rules: the window must be visible, and either
    /// carry `WS_EX_APPWINDOW` explicitly, or be an unowned captioned window
    /// that is not a tool window.
    pub fn is_taskbar_window(&self) -> bool {
        // SAFETY: these are simple query functions that read window state.
        unsafe {
            if !IsWindowVisible(self.hwnd).as_bool() {
                return false;
            }

            let style = GetWindowLongPtrW(self.hwnd, GWL_STYLE) as u32;
            let ex_style = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32;

            if (ex_style & WS_EX_APPWINDOW.0) == WS_EX_APPWINDOW.0 {
                return true;
            }
            if (ex_style & WS_EX_TOOLWINDOW.0) == WS_EX_TOOLWINDOW.0 {
                return false;
            }

            let has_caption = (style & WS_CAPTION.0) == WS_CAPTION.0;
            let has_owner = GetWindow(self.hwnd, GW_OWNER)
                .map(|h| !h.is_invalid())
                .unwrap_or(false);

            has_caption && !has_owner
        }
    }

    /// Snapshot of this window's registry-visible state.
    pub fn info(&self) -> WindowInfo {
        WindowInfo::new(self.raw(), self.title(), self.is_taskbar_window())
    }

    /// Restores the window if minimized and gives it the foreground.
    pub fn bring_to_front(&self) {
        // SAFETY: both calls are safe with a valid HWND; they fail
        // harmlessly for a window that disappeared in the meantime.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_RESTORE);
            let _ = SetForegroundWindow(self.hwnd);
        }
    }
}

/// Returns the current foreground window handle, or `None` when the OS
/// reports no foreground window (e.g. during a desktop switch).
pub fn foreground_window() -> Option<usize> {
    // SAFETY: GetForegroundWindow is a side-effect-free query.
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() {
        None
    } else {
        Some(hwnd.0 as usize)
    }
}

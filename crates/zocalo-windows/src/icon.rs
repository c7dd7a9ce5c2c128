use zocalo_core::icon::{IconQueries, resolve_icon};

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GCLP_HICON, GCLP_HICONSM, GetClassLongPtrW, SMTO_ABORTIFHUNG, SMTO_BLOCK,
    SendMessageTimeoutW, WM_GETICON,
};

use crate::window::Window;

/// WM_GETICON wParam selectors.
const ICON_SMALL: usize = 0;
const ICON_BIG: usize = 1;

/// How long a window gets to answer an icon query before we move on.
///
/// A hung window must not stall the thread that drives the bar, so the
/// query aborts early instead of waiting out the full message timeout.
const ICON_QUERY_TIMEOUT_MS: u32 = 200;

/// Win32-backed icon queries for one window.
struct HwndIconQueries {
    hwnd: HWND,
}

impl HwndIconQueries {
    /// Asks the window itself for an icon via `WM_GETICON`.
    ///
    /// Uses `SendMessageTimeoutW` so an unresponsive window yields `None`
    /// instead of blocking. A zero result means "no such icon".
    fn query_app_icon(&self, kind: usize) -> Option<usize> {
        let mut result: usize = 0;
        // SAFETY: SendMessageTimeoutW with a valid HWND is safe; the
        // result pointer outlives the synchronous call.
        let outcome = unsafe {
            SendMessageTimeoutW(
                self.hwnd,
                WM_GETICON,
                WPARAM(kind),
                LPARAM(0),
                SMTO_ABORTIFHUNG | SMTO_BLOCK,
                ICON_QUERY_TIMEOUT_MS,
                Some(&mut result),
            )
        };
        if outcome.0 == 0 || result == 0 {
            None
        } else {
            Some(result)
        }
    }

    /// Reads an icon handle registered on the window class.
    fn query_class_icon(&self, index: windows::Win32::UI::WindowsAndMessaging::GET_CLASS_LONG_INDEX) -> Option<usize> {
        // SAFETY: GetClassLongPtrW reads class data; returns 0 on failure.
        let handle = unsafe { GetClassLongPtrW(self.hwnd, index) };
        if handle == 0 { None } else { Some(handle) }
    }
}

impl IconQueries for HwndIconQueries {
    fn class_icon_large(&self) -> Option<usize> {
        self.query_class_icon(GCLP_HICON)
    }

    fn app_icon_small(&self) -> Option<usize> {
        self.query_app_icon(ICON_SMALL)
    }

    fn app_icon_large(&self) -> Option<usize> {
        self.query_app_icon(ICON_BIG)
    }

    fn class_icon_small(&self) -> Option<usize> {
        self.query_class_icon(GCLP_HICONSM)
    }
}

/// Resolves a best-effort icon for the given window.
///
/// Runs the core fallback chain over the Win32 queries. Returns `None`
/// when the window exposes no icon at all; the renderer then draws a
/// placeholder instead.
pub fn window_icon(window: &Window) -> Option<usize> {
    resolve_icon(&HwndIconQueries {
        hwnd: window.hwnd(),
    })
}

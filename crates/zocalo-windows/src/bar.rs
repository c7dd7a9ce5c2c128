//! The bar window itself.
//!
//! A borderless, always-on-top, non-alt-tabbable popup pinned to the
//! bottom of the primary screen. All shell state lives on the thread that
//! creates this window; the window procedure delegates to [`crate::shell`].

use std::sync::Once;

use zocalo_core::{Rect, ShellResult};

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, HWND_TOPMOST, MSG,
    RegisterClassW, SWP_SHOWWINDOW, SetForegroundWindow, SetWindowPos, TranslateMessage, WM_APP,
    WNDCLASSW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::w;

/// Posted to the bar window after the watcher queues a notice.
pub const WM_APP_NOTICE: u32 = WM_APP + 1;

/// Timer id for the foreground-window poll.
pub const TIMER_POLL: usize = 1;

/// Timer id for the clock refresh.
pub const TIMER_CLOCK: usize = 2;

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(bar_wnd_proc),
            lpszClassName: w!("ZocaloBar").into(),
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

unsafe extern "system" fn bar_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match crate::shell::handle_message(hwnd, msg, wparam, lparam) {
        Some(result) => result,
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Creates the hidden bar window at the given rectangle.
///
/// `WS_EX_TOOLWINDOW` keeps it out of Alt+Tab and the taskbar itself;
/// `WS_EX_TOPMOST` keeps it above application windows; `WS_POPUP` makes
/// it borderless and fixed-size. Shown later by [`show_and_raise`].
pub fn create(rect: Rect) -> ShellResult<HWND> {
    ensure_class_registered();

    let ex = WS_EX_TOOLWINDOW | WS_EX_TOPMOST;
    // SAFETY: CreateWindowExW with a registered class; the window is owned
    // by this thread for its whole life.
    let hwnd = unsafe {
        CreateWindowExW(
            ex,
            w!("ZocaloBar"),
            w!("zocalo"),
            WS_POPUP,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            None,
            None,
            None,
            None,
        )?
    };

    Ok(hwnd)
}

/// Makes the bar visible at its reserved position and brings it forward.
pub fn show_and_raise(hwnd: HWND, rect: Rect) {
    // SAFETY: both calls are safe with a valid HWND.
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            SWP_SHOWWINDOW,
        );
        let _ = SetForegroundWindow(hwnd);
    }
}

/// The Win32 message pump. Blocks until WM_QUIT is received.
pub fn run_message_pump() {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

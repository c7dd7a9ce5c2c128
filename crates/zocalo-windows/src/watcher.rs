//! Window registry watcher.
//!
//! Runs a WinEvent hook on its own thread and translates raw OS events
//! into [`WindowNotice`]s. Notices travel over an mpsc channel and a
//! `WM_APP` wakeup is posted to the bar window, so all mirror mutation
//! happens on the bar's thread — the hook thread never touches entries.

use std::sync::mpsc::Sender;
use std::thread;

use zocalo_core::{ShellResult, WindowNotice};

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, EVENT_OBJECT_CREATE, EVENT_OBJECT_DESTROY, EVENT_OBJECT_HIDE,
    EVENT_OBJECT_NAMECHANGE, EVENT_OBJECT_SHOW, EVENT_SYSTEM_FOREGROUND, GetMessageW, MSG,
    PostMessageW, PostThreadMessageW, TranslateMessage, WINEVENT_OUTOFCONTEXT,
    WINEVENT_SKIPOWNPROCESS, WM_QUIT,
};

use crate::bar::WM_APP_NOTICE;
use crate::window::Window;

/// Minimum event code we listen for (EVENT_SYSTEM_FOREGROUND = 0x0003).
const EVENT_MIN: u32 = EVENT_SYSTEM_FOREGROUND;

/// Maximum event code we listen for (EVENT_OBJECT_NAMECHANGE = 0x800C).
const EVENT_MAX: u32 = EVENT_OBJECT_NAMECHANGE;

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or menu item.
const OBJID_WINDOW: i32 = 0;

// Thread-local state for the WinEvent callback: the notice channel and
// the bar window to wake up after each send.
thread_local! {
    static NOTICE_SINK: std::cell::RefCell<Option<NoticeSink>> =
        const { std::cell::RefCell::new(None) };
}

struct NoticeSink {
    tx: Sender<WindowNotice>,
    bar_hwnd: usize,
}

/// Starts the watcher on a new thread.
///
/// Notices are sent through `tx`; after each send the bar window receives
/// a `WM_APP_NOTICE` wakeup and drains the channel on its own thread.
pub fn start(bar_hwnd: usize, tx: Sender<WindowNotice>) -> ShellResult<WatcherHandle> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        NOTICE_SINK.with(|cell| {
            *cell.borrow_mut() = Some(NoticeSink { tx, bar_hwnd });
        });

        let thread_id = unsafe { windows::Win32::System::Threading::GetCurrentThreadId() };

        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs in
        // our process. WINEVENT_SKIPOWNPROCESS ignores the bar's own
        // windows, so the bar never mirrors itself.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_MIN,
                EVENT_MAX,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if hook.is_invalid() {
            let _ = ready_tx.send(Err("failed to set WinEvent hook".to_string()));
            return;
        }

        let _ = ready_tx.send(Ok(thread_id));

        // Message pump: WinEvent callbacks are delivered through it.
        // Blocks until WM_QUIT arrives from stop().
        let mut msg = MSG::default();
        while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        unsafe {
            let _ = UnhookWinEvent(hook);
        }
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "watcher thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(WatcherHandle { thread_id, handle })
}

/// Handle for stopping the watcher from the shell.
pub struct WatcherHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl WatcherHandle {
    /// Signals the watcher to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Translates a raw Win32 event into a `WindowNotice`.
///
/// Returns `None` for child-object events and event types the mirror does
/// not care about. Show/create events for windows that do not want a
/// taskbar entry are dropped here so tooltips and menus never flood the
/// channel.
fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowNotice> {
    if id_object != OBJID_WINDOW {
        return None;
    }

    let window = Window::new(hwnd);

    match event {
        e if e == EVENT_OBJECT_SHOW || e == EVENT_OBJECT_CREATE => {
            let info = window.info();
            info.show_in_taskbar.then(|| WindowNotice::Added(info))
        }
        e if e == EVENT_OBJECT_DESTROY || e == EVENT_OBJECT_HIDE => Some(WindowNotice::Removed {
            handle: window.raw(),
        }),
        e if e == EVENT_OBJECT_NAMECHANGE => Some(WindowNotice::TitleChanged {
            handle: window.raw(),
            title: window.title(),
        }),
        e if e == EVENT_SYSTEM_FOREGROUND => Some(WindowNotice::Focused {
            handle: window.raw(),
        }),
        _ => None,
    }
}

/// The WinEvent callback. Runs on the watcher thread.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(notice) = translate(event, hwnd, id_object) {
        NOTICE_SINK.with(|cell| {
            if let Some(sink) = cell.borrow().as_ref() {
                if sink.tx.send(notice).is_ok() {
                    // Wake the bar thread so it drains the channel.
                    // SAFETY: PostMessageW is thread-safe and tolerates a
                    // destroyed target window.
                    unsafe {
                        let _ = PostMessageW(
                            Some(HWND(sink.bar_hwnd as *mut _)),
                            WM_APP_NOTICE,
                            WPARAM(0),
                            LPARAM(0),
                        );
                    }
                }
            }
        });
    }
}

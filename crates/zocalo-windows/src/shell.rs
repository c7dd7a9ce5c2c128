//! The bar controller.
//!
//! Owns startup sequencing, message handling, and shutdown teardown. All
//! shell state lives in a thread-local on the UI thread that created the
//! bar window; the watcher marshals its notices here via `WM_APP_NOTICE`,
//! and the foreground poll runs on this thread's own timer, so the
//! handle-to-entry mapping is never touched from anywhere else.

use std::cell::RefCell;
use std::sync::mpsc::{self, Receiver};

use zocalo_core::config::{Config, LauncherItem};
use zocalo_core::layout::{self, Hit};
use zocalo_core::{
    ActiveWindowTracker, Rect, ShellPhase, ShellResult, TaskMirror, Teardown, WindowNotice,
    log_error, log_info, log_warn,
};

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyWindow, InvalidateRect, KillTimer, PostQuitMessage, SetTimer, WM_CLOSE, WM_DESTROY,
    WM_LBUTTONDOWN, WM_PAINT, WM_TIMER,
};

use crate::bar::{TIMER_CLOCK, TIMER_POLL, WM_APP_NOTICE};
use crate::launch::ExitMode;
use crate::window::Window;
use crate::{appbar, bar, ctrl_c, dpi, enumerate, icon, launch, menu, monitor, watcher, window};

thread_local! {
    static SHELL: RefCell<Option<ShellState>> = const { RefCell::new(None) };
}

struct ShellState {
    config: Config,
    launcher: Vec<LauncherItem>,
    mirror: TaskMirror,
    tracker: ActiveWindowTracker,
    phase: ShellPhase,
    notices: Receiver<WindowNotice>,
    reservation: Option<appbar::AppBar>,
    watcher: Option<watcher::WatcherHandle>,
    rect: Rect,
}

/// Runs the bar until the user closes it.
///
/// Startup order matters: hide the native taskbar, compute geometry,
/// create the bar window, reserve its screen strip, seed the mirror from
/// a snapshot, subscribe to live changes, start the timers, raise the
/// bar. Every step after window creation degrades on failure instead of
/// aborting — a bar without a reservation is still a bar.
pub fn run(config: Config) -> ShellResult<()> {
    zocalo_core::log::init(&config.logging);
    dpi::enable_dpi_awareness();
    log_info!("zocalo starting (PID {})", std::process::id());

    if !appbar::hide_native_taskbar() {
        // Reported, not ignored: on configurations without a native
        // taskbar the restore step at shutdown will also have nothing
        // to do, which is worth knowing when debugging.
        log_warn!("no native taskbar found to hide; continuing without one");
    }

    let rect = match monitor::bar_rect(config.bar.height) {
        Ok(rect) => rect,
        Err(e) => {
            log_error!("bar geometry failed: {e}");
            launch::report_error(&format!("Could not position the bar: {e}"));
            Rect::new(0, 0, 800, config.bar.height)
        }
    };

    // No window means nothing to run a bar on — the one fatal startup
    // error. Put the native taskbar back before giving up.
    let hwnd = match bar::create(rect) {
        Ok(hwnd) => hwnd,
        Err(e) => {
            appbar::show_native_taskbar();
            return Err(e);
        }
    };

    let reservation = match appbar::AppBar::register(hwnd, rect) {
        Ok(reservation) => Some(reservation),
        Err(e) => {
            log_error!("screen reservation failed: {e}");
            launch::report_error("The bar could not reserve screen space; windows may overlap it.");
            None
        }
    };

    let mut mirror = TaskMirror::new();
    match enumerate::snapshot() {
        Ok(windows) => {
            for handle in mirror.sync(&windows) {
                let win = Window::from_raw(handle);
                mirror.set_icon(handle, icon::window_icon(&win));
            }
            log_info!("tracking {} windows", mirror.len());
        }
        Err(e) => {
            log_error!("window snapshot failed: {e}");
            launch::report_error("The bar could not list open windows; entries will appear as windows change.");
        }
    }

    let (notice_tx, notice_rx) = mpsc::channel();
    let watcher_handle = match watcher::start(hwnd.0 as usize, notice_tx) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log_error!("window watcher failed: {e}");
            launch::report_error("The bar could not subscribe to window changes; entries will not update.");
            None
        }
    };

    let poll_ms = config.bar.poll_interval_ms as u32;
    SHELL.with(|cell| {
        *cell.borrow_mut() = Some(ShellState {
            launcher: zocalo_core::config::load_launcher(),
            mirror,
            tracker: ActiveWindowTracker::new(),
            phase: ShellPhase::Uninitialized,
            notices: notice_rx,
            reservation,
            watcher: watcher_handle,
            rect,
            config,
        });
    });

    // Cooperative timers on this thread: foreground poll and clock.
    // SAFETY: SetTimer on a window owned by this thread.
    unsafe {
        SetTimer(Some(hwnd), TIMER_POLL, poll_ms, None);
        SetTimer(Some(hwnd), TIMER_CLOCK, 1000, None);
    }

    ctrl_c::set_handler(hwnd.0 as usize);
    bar::show_and_raise(hwnd, rect);

    SHELL.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.phase.advance(ShellPhase::Running);
        }
    });
    log_info!("bar running");

    bar::run_message_pump();

    let state = SHELL.with(|cell| cell.borrow_mut().take());
    shutdown(hwnd, state);
    Ok(())
}

/// The shutdown sequence. Every step runs regardless of earlier failures:
/// a reservation that refuses to unregister must not leave the user
/// without any taskbar at all.
fn shutdown(hwnd: HWND, state: Option<ShellState>) {
    let Some(mut state) = state else {
        // The pump exited before state was installed; the native taskbar
        // is the only thing that could still be hidden.
        appbar::show_native_taskbar();
        return;
    };
    state.phase.advance(ShellPhase::ShuttingDown);
    log_info!("shutting down");

    let mut teardown = Teardown::new();

    teardown.step("stop timers", || {
        // The OS discards timers with the destroyed window, so KillTimer
        // failing here is the normal case, not a shutdown defect.
        // SAFETY: timers were registered on this thread's window.
        unsafe {
            let _ = KillTimer(Some(hwnd), TIMER_POLL);
            let _ = KillTimer(Some(hwnd), TIMER_CLOCK);
        }
        Ok(())
    });

    teardown.step("unregister screen reservation", || {
        if let Some(mut reservation) = state.reservation.take() {
            reservation.unregister();
        }
        Ok(())
    });

    teardown.step("stop window watcher", || {
        if let Some(watcher) = state.watcher.take() {
            watcher.stop();
        }
        Ok(())
    });

    teardown.step("restore native taskbar", || {
        if appbar::show_native_taskbar() {
            Ok(())
        } else {
            Err("native taskbar window not found".into())
        }
    });

    state.phase.advance(ShellPhase::Stopped);
    if teardown.failures().is_empty() {
        log_info!("shutdown complete ({} steps)", teardown.steps_run());
    } else {
        log_warn!(
            "shutdown finished with {} failed step(s)",
            teardown.failures().len()
        );
    }
}

/// Handles one window message for the bar.
///
/// Returns `None` for messages the shell does not care about, which then
/// fall through to `DefWindowProcW`. Uses `try_borrow` throughout: a sent
/// broadcast can re-enter the window procedure while state is borrowed,
/// and bailing to the default handler is always safe.
pub(crate) fn handle_message(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<LRESULT> {
    match msg {
        WM_PAINT => SHELL.with(|cell| {
            let borrow = cell.try_borrow().ok()?;
            let state = borrow.as_ref()?;
            render_bar(hwnd, state);
            Some(LRESULT(0))
        }),
        WM_TIMER => match wparam.0 {
            TIMER_POLL => {
                on_poll_tick(hwnd);
                Some(LRESULT(0))
            }
            TIMER_CLOCK => {
                invalidate(hwnd);
                Some(LRESULT(0))
            }
            _ => None,
        },
        WM_APP_NOTICE => {
            drain_notices(hwnd);
            Some(LRESULT(0))
        }
        WM_LBUTTONDOWN => {
            let x = (lparam.0 & 0xFFFF) as i16 as i32;
            on_click(hwnd, x);
            Some(LRESULT(0))
        }
        WM_CLOSE => {
            // SAFETY: DestroyWindow on this thread's own window.
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            Some(LRESULT(0))
        }
        WM_DESTROY => {
            // SAFETY: PostQuitMessage only queues WM_QUIT for this thread.
            unsafe {
                PostQuitMessage(0);
            }
            Some(LRESULT(0))
        }
        _ => None,
    }
}

fn render_bar(hwnd: HWND, state: &ShellState) {
    crate::render::paint(hwnd, &state.config.bar, state.mirror.entries());
}

/// One foreground poll tick: query, compare, recompute highlights only
/// on an actual transition.
fn on_poll_tick(hwnd: HWND) {
    let changed = SHELL.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            return false;
        };
        let Some(state) = borrow.as_mut() else {
            return false;
        };
        if state.phase != ShellPhase::Running {
            return false;
        }
        match state.tracker.observe(window::foreground_window()) {
            Some(active) => {
                state.mirror.set_active(active);
                true
            }
            None => false,
        }
    });
    if changed {
        invalidate(hwnd);
    }
}

/// Drains queued registry notices in arrival order and applies them to
/// the mirror. Runs on the UI thread only.
fn drain_notices(hwnd: HWND) {
    let changed = SHELL.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            return false;
        };
        let Some(state) = borrow.as_mut() else {
            return false;
        };
        let mut changed = false;
        while let Ok(notice) = state.notices.try_recv() {
            changed |= apply_notice(state, notice);
        }
        changed
    });
    if changed {
        invalidate(hwnd);
    }
}

fn apply_notice(state: &mut ShellState, notice: WindowNotice) -> bool {
    match notice {
        WindowNotice::Added(info) => {
            let handle = info.handle;
            if state.mirror.add(&info) {
                let win = Window::from_raw(handle);
                state.mirror.set_icon(handle, icon::window_icon(&win));
                true
            } else {
                false
            }
        }
        WindowNotice::Removed { handle } => state.mirror.remove(handle),
        WindowNotice::TitleChanged { handle, title } => state.mirror.retitle(handle, &title),
        WindowNotice::Focused { handle } => {
            // Adopt activated windows the watcher never announced (they
            // existed before the hook, or surfaced without a show event),
            // then recompute the highlight without waiting for the poll.
            let mut changed = false;
            if !state.mirror.contains(handle) {
                let win = Window::from_raw(handle);
                let info = win.info();
                if state.mirror.add(&info) {
                    state.mirror.set_icon(handle, icon::window_icon(&win));
                    changed = true;
                }
            }
            if let Some(active) = state.tracker.observe(Some(handle)) {
                state.mirror.set_active(active);
                changed = true;
            }
            changed
        }
    }
}

enum ClickAction {
    ShowMenu(Vec<LauncherItem>),
    Activate(usize),
    Nothing,
}

/// Handles a click on the bar.
///
/// The hit is resolved while state is borrowed; anything that blocks
/// (menus, dialogs) runs after the borrow is released, because those
/// pump messages back into this window procedure.
fn on_click(hwnd: HWND, x: i32) {
    let action = SHELL.with(|cell| {
        let Ok(borrow) = cell.try_borrow() else {
            return ClickAction::Nothing;
        };
        let Some(state) = borrow.as_ref() else {
            return ClickAction::Nothing;
        };
        match layout::hit_test(x, state.rect.width, state.mirror.len()) {
            Hit::Start => ClickAction::ShowMenu(state.launcher.clone()),
            Hit::Entry(i) => ClickAction::Activate(state.mirror.entries()[i].handle),
            Hit::Clock | Hit::Background => ClickAction::Nothing,
        }
    });

    match action {
        ClickAction::ShowMenu(items) => match menu::show_start_menu(hwnd, &items) {
            Some(menu::MenuChoice::Launch(path)) => launch::launch(&path),
            Some(menu::MenuChoice::Language) => launch::launch("ms-settings:regionlanguage"),
            Some(menu::MenuChoice::Exit(mode)) => confirm_and_exit(mode),
            None => {}
        },
        ClickAction::Activate(handle) => {
            Window::from_raw(handle).bring_to_front();
            // Highlight immediately instead of waiting for the next poll.
            let changed = SHELL.with(|cell| {
                let Ok(mut borrow) = cell.try_borrow_mut() else {
                    return false;
                };
                let Some(state) = borrow.as_mut() else {
                    return false;
                };
                match state.tracker.observe(Some(handle)) {
                    Some(active) => {
                        state.mirror.set_active(active);
                        true
                    }
                    None => false,
                }
            });
            if changed {
                invalidate(hwnd);
            }
        }
        ClickAction::Nothing => {}
    }
}

fn confirm_and_exit(mode: ExitMode) {
    let question = match mode {
        ExitMode::LogOff => "Log off from the current session?",
        ExitMode::ShutDown => "Shut down the computer?",
    };
    if launch::confirm(question) {
        launch::exit_session(mode);
    }
}

fn invalidate(hwnd: HWND) {
    // SAFETY: InvalidateRect only queues a repaint.
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, false);
    }
}

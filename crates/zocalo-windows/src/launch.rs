//! Process launching, user dialogs, and session exit.
//!
//! Launches are fire-and-forget: a failure is reported to the user once
//! and never retried. Log off / shut down go through a confirmation.

use zocalo_core::{log_error, log_info};

use windows::Win32::System::Shutdown::{EWX_FORCE, EWX_LOGOFF, EWX_SHUTDOWN, ExitWindowsEx, SHUTDOWN_REASON};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::{
    IDYES, MB_ICONERROR, MB_ICONQUESTION, MB_OK, MB_YESNO, MESSAGEBOX_STYLE, MessageBoxW,
    SW_SHOWNORMAL,
};
use windows::core::{PCWSTR, w};

/// How the user wants to leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMode {
    LogOff,
    ShutDown,
}

/// Launches an executable or shell URI (e.g. `ms-settings:`).
///
/// Failures are reported to the user and logged; nothing is retried.
pub fn launch(path: &str) {
    let wide_path = wide(path);
    // SAFETY: ShellExecuteW with nul-terminated strings that outlive the
    // call. Values <= 32 in the returned pseudo-handle signal failure.
    let result = unsafe {
        ShellExecuteW(
            None,
            w!("open"),
            PCWSTR(wide_path.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    if result.0 as isize <= 32 {
        log_error!("failed to launch '{path}' (code {})", result.0 as isize);
        report_error(&format!("Could not launch: {path}"));
    } else {
        log_info!("launched '{path}'");
    }
}

/// Ends the session after the OS-level call; force-closes hung apps the
/// same way the original shell did.
pub fn exit_session(mode: ExitMode) {
    let flags = match mode {
        ExitMode::LogOff => EWX_LOGOFF,
        ExitMode::ShutDown => EWX_SHUTDOWN,
    };
    // SAFETY: ExitWindowsEx only requests the exit; it fails harmlessly
    // when the process lacks the shutdown privilege.
    if let Err(e) = unsafe { ExitWindowsEx(flags | EWX_FORCE, SHUTDOWN_REASON(0)) } {
        log_error!("ExitWindowsEx failed: {e}");
        report_error("The session could not be ended.");
    }
}

/// Shows a blocking error notice.
pub fn report_error(text: &str) {
    message_box(text, MB_OK | MB_ICONERROR);
}

/// Asks a yes/no question; returns `true` on Yes.
pub fn confirm(text: &str) -> bool {
    message_box(text, MB_YESNO | MB_ICONQUESTION) == IDYES
}

fn message_box(text: &str, style: MESSAGEBOX_STYLE) -> windows::Win32::UI::WindowsAndMessaging::MESSAGEBOX_RESULT {
    let wide_text = wide(text);
    // SAFETY: MessageBoxW blocks until dismissed; the strings outlive it.
    unsafe { MessageBoxW(None, PCWSTR(wide_text.as_ptr()), w!("Zocalo"), style) }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

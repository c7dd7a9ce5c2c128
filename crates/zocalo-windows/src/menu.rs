//! The start menu: a Win32 popup anchored above the start button.
//!
//! Uses `TPM_RETURNCMD` so the selection comes back as the return value
//! instead of a `WM_COMMAND` round-trip. The caller must not hold any
//! shell state borrow while this runs — `TrackPopupMenu` pumps messages.

use zocalo_core::config::LauncherItem;

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetWindowRect, MF_SEPARATOR, MF_STRING,
    SetForegroundWindow, TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_NONOTIFY, TPM_RETURNCMD,
    TrackPopupMenu,
};
use windows::core::{PCWSTR, w};

use crate::launch::ExitMode;

/// What the user picked from the start menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Launch the application at this path.
    Launch(String),
    /// Open the input-language settings page.
    Language,
    /// End the session.
    Exit(ExitMode),
}

// Command ids. Launcher items occupy CMD_LAUNCH_BASE + index.
const CMD_LAUNCH_BASE: usize = 1;
const CMD_LANGUAGE: usize = 9001;
const CMD_LOGOFF: usize = 9002;
const CMD_SHUTDOWN: usize = 9003;

/// Shows the start menu and blocks until the user picks or dismisses.
pub fn show_start_menu(bar: HWND, items: &[LauncherItem]) -> Option<MenuChoice> {
    // SAFETY: the menu handle is created, tracked, and destroyed within
    // this function; all strings outlive their AppendMenuW call.
    unsafe {
        let Ok(menu) = CreatePopupMenu() else {
            return None;
        };

        let wide_names: Vec<Vec<u16>> = items.iter().map(|i| wide(&i.name)).collect();
        for (i, name) in wide_names.iter().enumerate() {
            let _ = AppendMenuW(menu, MF_STRING, CMD_LAUNCH_BASE + i, PCWSTR(name.as_ptr()));
        }

        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        let _ = AppendMenuW(menu, MF_STRING, CMD_LANGUAGE, w!("Input language…"));
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        let _ = AppendMenuW(menu, MF_STRING, CMD_LOGOFF, w!("Log off"));
        let _ = AppendMenuW(menu, MF_STRING, CMD_SHUTDOWN, w!("Shut down"));

        // Anchor at the bar's top-left corner, growing upward.
        let mut bar_rect = RECT::default();
        let _ = GetWindowRect(bar, &mut bar_rect);

        // Required for the menu to dismiss when the user clicks elsewhere.
        let _ = SetForegroundWindow(bar);

        let picked = TrackPopupMenu(
            menu,
            TPM_LEFTALIGN | TPM_BOTTOMALIGN | TPM_RETURNCMD | TPM_NONOTIFY,
            bar_rect.left,
            bar_rect.top,
            0,
            bar,
            None,
        );
        let _ = DestroyMenu(menu);

        match picked.0 as usize {
            0 => None,
            CMD_LANGUAGE => Some(MenuChoice::Language),
            CMD_LOGOFF => Some(MenuChoice::Exit(ExitMode::LogOff)),
            CMD_SHUTDOWN => Some(MenuChoice::Exit(ExitMode::ShutDown)),
            cmd => items
                .get(cmd - CMD_LAUNCH_BASE)
                .map(|item| MenuChoice::Launch(item.path.clone())),
        }
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Screen reservation protocol (appbar) client.
pub mod appbar;

/// Bar window creation and message pump.
pub mod bar;

/// Ctrl+C handling for console-launched sessions.
pub mod ctrl_c;

/// DPI awareness and scaling.
pub mod dpi;

/// Win32 window enumeration.
pub mod enumerate;

/// Icon resolution via class and WM_GETICON queries.
pub mod icon;

/// Single-instance enforcement.
pub mod instance;

/// Process launching and session exit.
pub mod launch;

/// Start menu popup.
pub mod menu;

/// Screen metrics and bar geometry.
pub mod monitor;

/// GDI rendering of the bar contents.
pub mod render;

/// The bar controller: startup, message handling, shutdown.
pub mod shell;

/// WinEvent watcher feeding the window registry mirror.
pub mod watcher;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use shell::run;
pub use window::Window;

/// A boxed error type for shell operations.
///
/// Any error type that implements the `Error` trait can be boxed into this.
/// Setup paths propagate it with `?`; per-window paths swallow and log.
pub type ShellResult<T> = Result<T, Box<dyn std::error::Error>>;

/// A top-level window as reported by the external window registry.
///
/// The handle is an opaque, OS-assigned identifier. It is unique per live
/// window but may be reused by the OS after the window is destroyed, so a
/// handle is only meaningful between its add and remove notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Raw window handle (pointer-sized integer).
    pub handle: usize,
    /// Current window title. Mutable — updated via title-change notices.
    pub title: String,
    /// Whether the window wants a taskbar entry.
    pub show_in_taskbar: bool,
}

impl WindowInfo {
    pub fn new(handle: usize, title: impl Into<String>, show_in_taskbar: bool) -> Self {
        Self {
            handle,
            title: title.into(),
            show_in_taskbar,
        }
    }
}

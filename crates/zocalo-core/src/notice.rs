use crate::window::WindowInfo;

/// A change notification from the external window registry.
///
/// The platform watcher translates raw OS events into these variants and
/// sends them over a channel. They are applied to the mirror strictly in
/// arrival order, on the thread that owns the visual entries.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowNotice {
    /// A new top-level window appeared.
    Added(WindowInfo),

    /// A window was destroyed or hidden.
    Removed { handle: usize },

    /// A window's title changed.
    TitleChanged { handle: usize, title: String },

    /// A window received keyboard focus.
    ///
    /// Carried so an activated window that was never announced as added
    /// (e.g. one created before the watcher started) can still get an entry.
    Focused { handle: usize },
}

impl WindowNotice {
    /// Returns the window handle associated with this notice.
    pub fn handle(&self) -> usize {
        match self {
            Self::Added(info) => info.handle,
            Self::Removed { handle }
            | Self::TitleChanged { handle, .. }
            | Self::Focused { handle } => *handle,
        }
    }
}

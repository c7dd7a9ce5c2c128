use crate::window::WindowInfo;

/// The visual representation of one tracked window in the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualEntry {
    /// Handle of the backing window.
    pub handle: usize,
    /// Title shown on the entry.
    pub title: String,
    /// Raw icon handle resolved for this window, if any. `None` means
    /// the renderer draws a placeholder.
    pub icon: Option<usize>,
    /// Whether this entry corresponds to the foreground window.
    pub highlighted: bool,
}

/// Mirrors the external window registry as an ordered set of visual entries.
///
/// Exactly one entry exists per tracked handle, kept in first-seen order.
/// All mutation must happen on the thread that owns the bar window; the
/// watcher marshals its notifications there before calling in.
#[derive(Debug, Default)]
pub struct TaskMirror {
    entries: Vec<VisualEntry>,
}

impl TaskMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a full registry snapshot, creating entries for windows that
    /// want a taskbar presence and are not yet tracked.
    ///
    /// Returns the handles of the newly created entries so the caller can
    /// resolve their icons. Already-tracked handles are left untouched, so
    /// this is safe to call after live notifications have started.
    pub fn sync(&mut self, windows: &[WindowInfo]) -> Vec<usize> {
        let mut added = Vec::new();
        for info in windows {
            if self.add(info) {
                added.push(info.handle);
            }
        }
        added
    }

    /// Creates an entry for the given window.
    ///
    /// Returns `false` without touching anything when the window opts out of
    /// the taskbar or an entry for its handle already exists. Duplicate add
    /// notifications are therefore no-ops.
    pub fn add(&mut self, info: &WindowInfo) -> bool {
        if !info.show_in_taskbar || self.contains(info.handle) {
            return false;
        }
        self.entries.push(VisualEntry {
            handle: info.handle,
            title: info.title.clone(),
            icon: None,
            highlighted: false,
        });
        true
    }

    /// Removes the entry for the given handle.
    ///
    /// Returns `false` when no entry exists — removal notices arrive for
    /// windows that were never shown in the taskbar, and must be tolerated.
    pub fn remove(&mut self, handle: usize) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Updates an entry's title in place.
    ///
    /// The entry keeps its position, icon, and highlight state. Returns
    /// `false` when the handle is not tracked.
    pub fn retitle(&mut self, handle: usize, title: &str) -> bool {
        match self.entry_mut(handle) {
            Some(entry) => {
                entry.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Stores the resolved icon for an entry. No-op for untracked handles.
    pub fn set_icon(&mut self, handle: usize, icon: Option<usize>) {
        if let Some(entry) = self.entry_mut(handle) {
            entry.icon = icon;
        }
    }

    /// Recomputes highlight state against the given foreground handle.
    ///
    /// At most one entry ends up highlighted: the one matching `active`.
    /// An untracked or absent foreground handle clears every highlight.
    pub fn set_active(&mut self, active: Option<usize>) {
        for entry in &mut self.entries {
            entry.highlighted = Some(entry.handle) == active;
        }
    }

    /// Returns the handle of the highlighted entry, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.entries.iter().find(|e| e.highlighted).map(|e| e.handle)
    }

    pub fn contains(&self, handle: usize) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn entries(&self) -> &[VisualEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, handle: usize) -> Option<&mut VisualEntry> {
        self.entries.iter_mut().find(|e| e.handle == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(handle: usize, title: &str) -> WindowInfo {
        WindowInfo::new(handle, title, true)
    }

    #[test]
    fn sync_creates_entries_for_taskbar_windows_only() {
        // Arrange
        let mut mirror = TaskMirror::new();
        let snapshot = vec![
            win(1, "Mail"),
            WindowInfo::new(2, "Tooltip", false),
            win(3, "Browser"),
        ];

        // Act
        let added = mirror.sync(&snapshot);

        // Assert
        assert_eq!(added, vec![1, 3]);
        assert_eq!(mirror.len(), 2);
        assert!(!mirror.contains(2));
    }

    #[test]
    fn sync_is_idempotent_for_known_handles() {
        let mut mirror = TaskMirror::new();
        let snapshot = vec![win(1, "Mail")];
        mirror.sync(&snapshot);

        let added = mirror.sync(&snapshot);

        assert!(added.is_empty());
        assert_eq!(mirror.len(), 1);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut mirror = TaskMirror::new();
        assert!(mirror.add(&win(1, "Mail")));
        assert!(!mirror.add(&win(1, "Mail")));
        assert_eq!(mirror.len(), 1);
    }

    #[test]
    fn add_skips_windows_that_opt_out_of_the_taskbar() {
        let mut mirror = TaskMirror::new();
        assert!(!mirror.add(&WindowInfo::new(1, "Splash", false)));
        assert!(mirror.is_empty());
    }

    #[test]
    fn remove_untracked_handle_is_a_no_op() {
        let mut mirror = TaskMirror::new();
        mirror.add(&win(1, "Mail"));

        assert!(!mirror.remove(99));
        assert_eq!(mirror.len(), 1);
    }

    #[test]
    fn retitle_updates_in_place_and_preserves_highlight() {
        let mut mirror = TaskMirror::new();
        mirror.add(&win(1, "Mail"));
        mirror.add(&win(2, "Chat"));
        mirror.set_icon(1, Some(0xBEEF));
        mirror.set_active(Some(1));

        assert!(mirror.retitle(1, "Mail (3)"));

        let entry = &mirror.entries()[0];
        assert_eq!(entry.title, "Mail (3)");
        assert_eq!(entry.icon, Some(0xBEEF));
        assert!(entry.highlighted);
        // Position unchanged: still first.
        assert_eq!(entry.handle, 1);
    }

    #[test]
    fn retitle_untracked_handle_returns_false() {
        let mut mirror = TaskMirror::new();
        assert!(!mirror.retitle(7, "Ghost"));
    }

    #[test]
    fn convergence_scenario_from_notification_burst() {
        // snapshot [{H1,"Mail",true}] -> add {H2,"Chat",true}
        // -> rename H1 "Mail (3)" -> remove H1 => {H2:"Chat"}
        let mut mirror = TaskMirror::new();
        mirror.sync(&[win(1, "Mail")]);
        mirror.add(&win(2, "Chat"));
        mirror.retitle(1, "Mail (3)");
        mirror.remove(1);

        assert_eq!(mirror.len(), 1);
        let entry = &mirror.entries()[0];
        assert_eq!(entry.handle, 2);
        assert_eq!(entry.title, "Chat");
    }

    #[test]
    fn handle_reuse_after_removal_creates_a_fresh_entry() {
        let mut mirror = TaskMirror::new();
        mirror.add(&win(1, "Old"));
        mirror.set_icon(1, Some(0xAB));
        mirror.set_active(Some(1));
        mirror.remove(1);

        // The OS reused the handle for a brand-new window.
        mirror.add(&win(1, "New"));

        let entry = &mirror.entries()[0];
        assert_eq!(entry.title, "New");
        assert_eq!(entry.icon, None);
        assert!(!entry.highlighted);
    }

    #[test]
    fn at_most_one_entry_is_highlighted() {
        let mut mirror = TaskMirror::new();
        mirror.sync(&[win(1, "A"), win(2, "B"), win(3, "C")]);

        mirror.set_active(Some(2));
        assert_eq!(mirror.highlighted(), Some(2));
        assert_eq!(
            mirror.entries().iter().filter(|e| e.highlighted).count(),
            1
        );

        mirror.set_active(Some(3));
        assert_eq!(mirror.highlighted(), Some(3));
        assert_eq!(
            mirror.entries().iter().filter(|e| e.highlighted).count(),
            1
        );
    }

    #[test]
    fn untracked_foreground_clears_all_highlights() {
        let mut mirror = TaskMirror::new();
        mirror.sync(&[win(1, "A"), win(2, "B")]);
        mirror.set_active(Some(1));

        // A transient popup took focus; it has no entry.
        mirror.set_active(Some(42));

        assert_eq!(mirror.highlighted(), None);
    }

    #[test]
    fn entries_keep_first_seen_order() {
        let mut mirror = TaskMirror::new();
        mirror.add(&win(3, "C"));
        mirror.add(&win(1, "A"));
        mirror.add(&win(2, "B"));

        let order: Vec<usize> = mirror.entries().iter().map(|e| e.handle).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}

/// Tracks the OS foreground window across poll ticks.
///
/// Two states: no active window, or active window with a handle. A
/// transition happens only when a poll observes a handle different from the
/// stored one; equal polls are no-ops so the bar does no redundant repaint
/// work on every tick.
#[derive(Debug, Default)]
pub struct ActiveWindowTracker {
    active: Option<usize>,
}

impl ActiveWindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently observed foreground handle.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Feeds one foreground poll result into the tracker.
    ///
    /// Returns `Some(new_value)` when the observation differs from the
    /// stored state (the caller should recompute highlights), `None` when
    /// nothing changed. The state updates even when the new handle is not
    /// tracked by the mirror — the highlight recompute then clears every
    /// entry, which is the correct visible result.
    pub fn observe(&mut self, foreground: Option<usize>) -> Option<Option<usize>> {
        if foreground == self.active {
            return None;
        }
        self.active = foreground;
        Some(foreground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::TaskMirror;
    use crate::window::WindowInfo;

    #[test]
    fn starts_with_no_active_window() {
        let tracker = ActiveWindowTracker::new();
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn repeated_observation_is_a_no_op() {
        let mut tracker = ActiveWindowTracker::new();
        assert_eq!(tracker.observe(Some(1)), Some(Some(1)));
        assert_eq!(tracker.observe(Some(1)), None);
        assert_eq!(tracker.active(), Some(1));
    }

    #[test]
    fn losing_the_foreground_transitions_to_none() {
        let mut tracker = ActiveWindowTracker::new();
        tracker.observe(Some(1));
        assert_eq!(tracker.observe(None), Some(None));
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn poll_sequence_drives_highlight_transitions() {
        // Polls H1, H1, H2, H3(untracked) with tracked set {H1, H2}
        // => highlight H1 -> no-op -> H2 -> none.
        let mut tracker = ActiveWindowTracker::new();
        let mut mirror = TaskMirror::new();
        mirror.add(&WindowInfo::new(1, "One", true));
        mirror.add(&WindowInfo::new(2, "Two", true));

        if let Some(active) = tracker.observe(Some(1)) {
            mirror.set_active(active);
        }
        assert_eq!(mirror.highlighted(), Some(1));

        // Same handle again: no transition, highlight untouched.
        assert_eq!(tracker.observe(Some(1)), None);
        assert_eq!(mirror.highlighted(), Some(1));

        if let Some(active) = tracker.observe(Some(2)) {
            mirror.set_active(active);
        }
        assert_eq!(mirror.highlighted(), Some(2));

        // Untracked window takes focus: state updates, nothing highlighted.
        if let Some(active) = tracker.observe(Some(3)) {
            mirror.set_active(active);
        }
        assert_eq!(tracker.active(), Some(3));
        assert_eq!(mirror.highlighted(), None);
    }
}

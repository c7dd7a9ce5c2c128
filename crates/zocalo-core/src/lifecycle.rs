use crate::window::ShellResult;

/// Lifecycle phases of the bar controller.
///
/// Replaces an ad-hoc "is initialized" flag with an explicit, forward-only
/// state machine. Phases only ever advance; a shell that finished shutting
/// down stays `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShellPhase {
    Uninitialized,
    Running,
    ShuttingDown,
    Stopped,
}

impl ShellPhase {
    /// Advances to the given phase. Returns `false` (leaving the phase
    /// untouched) when the transition would move backwards or repeat.
    pub fn advance(&mut self, next: ShellPhase) -> bool {
        if next > *self {
            *self = next;
            true
        } else {
            false
        }
    }
}

/// Runs shutdown steps so that a failing step never skips the rest.
///
/// Each step executes immediately when registered; errors are logged and
/// recorded rather than propagated. The shutdown sequence has no ordering
/// dependency between steps strong enough to justify aborting — e.g. a
/// failed reservation unregister must not leave the native taskbar hidden.
#[derive(Debug, Default)]
pub struct Teardown {
    failures: Vec<(String, String)>,
    steps_run: usize,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes one named shutdown step, swallowing its error.
    pub fn step(&mut self, name: &str, step: impl FnOnce() -> ShellResult<()>) {
        self.steps_run += 1;
        if let Err(e) = step() {
            crate::log_warn!("teardown step '{name}' failed: {e}");
            self.failures.push((name.to_string(), e.to_string()));
        }
    }

    /// Steps that reported an error, as (name, message) pairs.
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }

    /// Total number of steps executed, failed or not.
    pub fn steps_run(&self) -> usize {
        self.steps_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_advance_forward() {
        let mut phase = ShellPhase::Uninitialized;

        assert!(phase.advance(ShellPhase::Running));
        assert!(phase.advance(ShellPhase::ShuttingDown));
        assert!(phase.advance(ShellPhase::Stopped));
        assert_eq!(phase, ShellPhase::Stopped);

        // Backwards and repeated transitions are rejected.
        assert!(!phase.advance(ShellPhase::Running));
        assert!(!phase.advance(ShellPhase::Stopped));
        assert_eq!(phase, ShellPhase::Stopped);
    }

    #[test]
    fn phase_can_skip_ahead() {
        // A shell whose startup failed goes straight to shutdown.
        let mut phase = ShellPhase::Uninitialized;
        assert!(phase.advance(ShellPhase::ShuttingDown));
    }

    #[test]
    fn all_steps_run_when_one_fails() {
        let mut order = Vec::new();
        let mut teardown = Teardown::new();

        teardown.step("stop timers", || {
            order.push("stop timers");
            Ok(())
        });
        teardown.step("unregister reservation", || {
            order.push("unregister reservation");
            Err("appbar message rejected".into())
        });
        teardown.step("stop watcher", || {
            order.push("stop watcher");
            Ok(())
        });
        teardown.step("restore native taskbar", || {
            order.push("restore native taskbar");
            Ok(())
        });

        assert_eq!(
            order,
            vec![
                "stop timers",
                "unregister reservation",
                "stop watcher",
                "restore native taskbar",
            ]
        );
        assert_eq!(teardown.steps_run(), 4);
        assert_eq!(teardown.failures().len(), 1);
        assert_eq!(teardown.failures()[0].0, "unregister reservation");
    }

    #[test]
    fn every_step_failing_still_runs_them_all() {
        let mut teardown = Teardown::new();
        for name in ["a", "b", "c"] {
            teardown.step(name, || Err("boom".into()));
        }
        assert_eq!(teardown.steps_run(), 3);
        assert_eq!(teardown.failures().len(), 3);
    }
}

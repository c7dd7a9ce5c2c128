/// Ordered icon queries the platform must provide for one window.
///
/// Each query returns a raw icon handle, or `None` when the window has no
/// icon of that kind or did not answer. Failures never propagate — a query
/// that cannot be answered is simply the next step's problem.
pub trait IconQueries {
    /// Large icon registered on the window class.
    fn class_icon_large(&self) -> Option<usize>;

    /// Small icon supplied by the application via the icon-query message.
    fn app_icon_small(&self) -> Option<usize>;

    /// Large icon supplied by the application via the icon-query message.
    fn app_icon_large(&self) -> Option<usize>;

    /// Small icon registered on the window class.
    fn class_icon_small(&self) -> Option<usize>;
}

/// Resolves a best-effort icon through the fallback chain.
///
/// Steps are evaluated in strict order and evaluation stops at the first
/// hit, so a misbehaving window is probed at most four times. `None` means
/// every step came up empty; callers render a placeholder.
pub fn resolve_icon(queries: &impl IconQueries) -> Option<usize> {
    queries
        .class_icon_large()
        .or_else(|| queries.app_icon_small())
        .or_else(|| queries.app_icon_large())
        .or_else(|| queries.class_icon_small())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted queries that record which steps were evaluated.
    struct Scripted {
        answers: [Option<usize>; 4],
        asked: RefCell<Vec<usize>>,
    }

    impl Scripted {
        fn new(answers: [Option<usize>; 4]) -> Self {
            Self {
                answers,
                asked: RefCell::new(Vec::new()),
            }
        }

        fn answer(&self, step: usize) -> Option<usize> {
            self.asked.borrow_mut().push(step);
            self.answers[step]
        }
    }

    impl IconQueries for Scripted {
        fn class_icon_large(&self) -> Option<usize> {
            self.answer(0)
        }
        fn app_icon_small(&self) -> Option<usize> {
            self.answer(1)
        }
        fn app_icon_large(&self) -> Option<usize> {
            self.answer(2)
        }
        fn class_icon_small(&self) -> Option<usize> {
            self.answer(3)
        }
    }

    #[test]
    fn first_step_wins_without_probing_further() {
        let q = Scripted::new([Some(0xA), Some(0xB), Some(0xC), Some(0xD)]);
        assert_eq!(resolve_icon(&q), Some(0xA));
        assert_eq!(*q.asked.borrow(), vec![0]);
    }

    #[test]
    fn window_answering_only_the_third_step() {
        // Only the application-supplied large icon exists. The chain must
        // return it and never evaluate the fourth step.
        let q = Scripted::new([None, None, Some(0xC0FFEE), None]);
        assert_eq!(resolve_icon(&q), Some(0xC0FFEE));
        assert_eq!(*q.asked.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn all_steps_empty_yields_none() {
        let q = Scripted::new([None, None, None, None]);
        assert_eq!(resolve_icon(&q), None);
        assert_eq!(*q.asked.borrow(), vec![0, 1, 2, 3]);
    }
}

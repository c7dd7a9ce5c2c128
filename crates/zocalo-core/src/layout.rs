//! Horizontal slot layout for the bar.
//!
//! Pure geometry shared by the renderer and the click hit test, so a click
//! always lands on the same entry the user sees.

/// Width of the start button region, in pixels.
pub const START_WIDTH: i32 = 64;

/// Width of the clock region at the right edge, in pixels.
pub const CLOCK_WIDTH: i32 = 96;

/// Maximum width of a single window entry, in pixels.
pub const ENTRY_MAX_WIDTH: i32 = 220;

/// Horizontal extent of one window entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: i32,
    pub width: i32,
}

/// What a horizontal position on the bar corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Start,
    Entry(usize),
    Clock,
    Background,
}

/// Computes the entry slots for the given bar width and entry count.
///
/// Entries share the region between the start button and the clock; each
/// gets an equal share capped at [`ENTRY_MAX_WIDTH`]. When the bar is too
/// narrow to give every entry at least one pixel, the overflow entries get
/// zero-width slots and are simply not clickable.
pub fn entry_slots(bar_width: i32, count: usize) -> Vec<Slot> {
    if count == 0 {
        return Vec::new();
    }
    let available = (bar_width - START_WIDTH - CLOCK_WIDTH).max(0);
    let width = (available / count as i32).min(ENTRY_MAX_WIDTH).max(0);

    (0..count)
        .map(|i| Slot {
            x: START_WIDTH + width * i as i32,
            width,
        })
        .collect()
}

/// Maps a horizontal position to the region under it.
pub fn hit_test(x: i32, bar_width: i32, count: usize) -> Hit {
    if x < 0 || x >= bar_width {
        return Hit::Background;
    }
    if x < START_WIDTH {
        return Hit::Start;
    }
    if x >= bar_width - CLOCK_WIDTH {
        return Hit::Clock;
    }
    for (i, slot) in entry_slots(bar_width, count).iter().enumerate() {
        if x >= slot.x && x < slot.x + slot.width {
            return Hit::Entry(i);
        }
    }
    Hit::Background
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_start_after_the_start_button() {
        let slots = entry_slots(1920, 3);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].x, START_WIDTH);
        assert_eq!(slots[1].x, START_WIDTH + slots[0].width);
    }

    #[test]
    fn entry_width_is_capped() {
        let slots = entry_slots(1920, 2);
        assert!(slots.iter().all(|s| s.width == ENTRY_MAX_WIDTH));
    }

    #[test]
    fn many_entries_shrink_to_fit() {
        let slots = entry_slots(800, 16);
        let total: i32 = slots.iter().map(|s| s.width).sum();
        assert!(total <= 800 - START_WIDTH - CLOCK_WIDTH);
        assert!(slots[0].width < ENTRY_MAX_WIDTH);
    }

    #[test]
    fn no_entries_no_slots() {
        assert!(entry_slots(1920, 0).is_empty());
    }

    #[test]
    fn hit_test_maps_each_region() {
        let width = 1920;
        assert_eq!(hit_test(10, width, 2), Hit::Start);
        assert_eq!(hit_test(START_WIDTH, width, 2), Hit::Entry(0));
        assert_eq!(hit_test(START_WIDTH + ENTRY_MAX_WIDTH, width, 2), Hit::Entry(1));
        assert_eq!(hit_test(width - 1, width, 2), Hit::Clock);
        assert_eq!(hit_test(width / 2, width, 0), Hit::Background);
    }

    #[test]
    fn hit_test_rejects_out_of_bounds() {
        assert_eq!(hit_test(-1, 1920, 2), Hit::Background);
        assert_eq!(hit_test(1920, 1920, 2), Hit::Background);
    }

    #[test]
    fn hit_test_matches_rendered_slots() {
        let width = 1000;
        for (i, slot) in entry_slots(width, 5).iter().enumerate() {
            assert_eq!(hit_test(slot.x, width, 5), Hit::Entry(i));
            assert_eq!(hit_test(slot.x + slot.width - 1, width, 5), Hit::Entry(i));
        }
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// A strip of the given height anchored to this rectangle's bottom
    /// edge, spanning its full width. This is the bar's home.
    pub fn bottom_strip(&self, height: i32) -> Rect {
        Rect::new(self.x, self.bottom() - height, self.width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_strip_spans_full_width_at_the_bottom_edge() {
        let screen = Rect::new(0, 0, 1920, 1080);
        let bar = screen.bottom_strip(52);

        assert_eq!(bar, Rect::new(0, 1028, 1920, 52));
        assert_eq!(bar.bottom(), screen.bottom());
        assert_eq!(bar.right(), screen.right());
    }
}

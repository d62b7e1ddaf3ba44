use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
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

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x < self.right() && pt.y >= self.y && pt.y < self.bottom()
    }

    /// Returns the rectangle shrunk inward by the given padding on each side.
    ///
    /// Degenerate results (negative extents) are clamped to zero size, so
    /// `contains` is simply always false for them.
    pub fn shrunk(&self, pad_x: i32, pad_y: i32) -> Rect {
        Rect {
            x: self.x + pad_x,
            y: self.y + pad_y,
            width: (self.width - pad_x * 2).max(0),
            height: (self.height - pad_y * 2).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_left_exclusive_right() {
        let r = Rect::new(10, 10, 100, 50);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(109, 59)));
        assert!(!r.contains(Point::new(110, 10)));
        assert!(!r.contains(Point::new(10, 60)));
        assert!(!r.contains(Point::new(9, 10)));
    }

    #[test]
    fn shrunk_moves_all_four_edges() {
        let r = Rect::new(0, 0, 100, 100).shrunk(8, 6);
        assert_eq!(r, Rect::new(8, 6, 84, 88));
    }

    #[test]
    fn shrunk_clamps_degenerate_rects() {
        let r = Rect::new(0, 0, 10, 10).shrunk(8, 6);
        assert_eq!(r.width, 0);
        assert!(!r.contains(Point::new(8, 6)));
    }
}

//! Plain geometric value types used by pixel-buffer operations.

/// A pixel coordinate. May be negative; operations clip as documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel count, used to decide whether a resize scales up or down.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub origin: Point,
    pub size: Size,
}

impl Rectangle {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.origin.x as i64 + self.size.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.size.height as i64
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.origin.x as i64 + self.size.width as i64 / 2) as i32,
            (self.origin.y as i64 + self.size.height as i64 / 2) as i32,
        )
    }

    /// Whether this rectangle lies entirely within `bounds` anchored at the origin.
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.origin.x >= 0
            && self.origin.y >= 0
            && self.right() <= bounds.width as i64
            && self.bottom() <= bounds.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_compares_sizes() {
        assert!(Size::new(50, 50).area() < Size::new(100, 100).area());
        assert_eq!(Size::new(20, 5).area(), Size::new(10, 10).area());
    }

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(Size::new(u32::MAX, 2).area(), u32::MAX as u64 * 2);
    }

    #[test]
    fn center_of_rectangle() {
        assert_eq!(Rectangle::from_xywh(10, 20, 100, 50).center(), Point::new(60, 45));
    }

    #[test]
    fn fits_within_bounds() {
        let bounds = Size::new(10, 10);
        assert!(Rectangle::from_xywh(0, 0, 10, 10).fits_within(bounds));
        assert!(Rectangle::from_xywh(2, 3, 4, 5).fits_within(bounds));
        assert!(!Rectangle::from_xywh(5, 5, 6, 1).fits_within(bounds));
        assert!(!Rectangle::from_xywh(-1, 0, 2, 2).fits_within(bounds));
    }
}

//! Core geometry types
//!
//! Screen-space primitives shared by the layout, visual and rendering
//! layers. Coordinates are in surface pixels.

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle from two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Returns the right edge coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment test, matching the half-open intervals the
    /// domain uses for clash detection.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Moves the rectangle so its top-left corner sits at `origin`.
    pub fn at(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn rect_contains_point() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(15.0, 15.0)));
        assert!(rect.contains(Point::new(10.0, 10.0))); // top-left corner
        assert!(!rect.contains(Point::new(30.0, 30.0))); // exclusive far edge
        assert!(!rect.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn rect_from_corners_normalizes() {
        let rect = Rect::from_corners(Point::new(30.0, 40.0), Point::new(10.0, 20.0));
        assert_eq!(rect, Rect::new(10.0, 20.0, 20.0, 20.0));
    }

    #[test]
    fn rect_repositioning() {
        let rect = Rect::new(5.0, 5.0, 40.0, 30.0);
        let moved = rect.at(Point::new(0.0, 100.0));
        assert_eq!(moved, Rect::new(0.0, 100.0, 40.0, 30.0));
    }
}

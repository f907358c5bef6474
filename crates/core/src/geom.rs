use serde::{Deserialize, Serialize};

/// A point in layout coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

/// An axis-aligned rectangle described by its two extreme corners.
///
/// `min` holds the smallest coordinates on both axes and `max` the largest.
/// A rectangle whose `max` is not strictly greater than its `min` on either
/// axis is empty and includes no point.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

#[macro_export]
macro_rules! pt {
    ($x:expr, $y:expr $(,)* ) => {
        $crate::geom::Point::new($x as f32, $y as f32)
    };
}

#[macro_export]
macro_rules! rect {
    ($x0:expr, $y0:expr, $x1:expr, $y1:expr $(,)* ) => {
        $crate::geom::Rectangle::new($crate::pt!($x0, $y0), $crate::pt!($x1, $y1))
    };
}

impl Rectangle {
    pub const fn new(min: Point, max: Point) -> Rectangle {
        Rectangle { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Half-open containment: the minimum edges belong to the rectangle,
    /// the maximum edges don't.
    pub fn includes(&self, pt: Point) -> bool {
        !self.is_empty()
            && self.min.x <= pt.x
            && pt.x < self.max.x
            && self.min.y <= pt.y
            && pt.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_includes_is_half_open() {
        let rect = rect![10, 20, 30, 40];
        assert!(rect.includes(pt!(10, 20)));
        assert!(rect.includes(pt!(29.9, 39.9)));
        assert!(!rect.includes(pt!(30, 25)));
        assert!(!rect.includes(pt!(15, 40)));
        assert!(!rect.includes(pt!(9.9, 25)));
    }

    #[test]
    fn test_empty_rectangle_includes_nothing() {
        let inverted = rect![30, 20, 10, 40];
        assert!(inverted.is_empty());
        assert!(!inverted.includes(pt!(20, 30)));

        let flat = rect![0, 5, 10, 5];
        assert!(flat.is_empty());
        assert!(!flat.includes(pt!(5, 5)));
    }

    #[test]
    fn test_dimensions_and_center() {
        let rect = rect![100, 0, 300, 50];
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center_x(), 200.0);
    }
}

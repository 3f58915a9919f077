//! Fabric geometry in placement units.
//!
//! All coordinates are continuous: the solver works on real-valued centers and
//! extents, and only the downstream directive emitter snaps them to sites.

use serde::{Deserialize, Serialize};

/// A point on the fabric, in placement units.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle extent (width by height), in placement units.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Dimensions {
    /// Creates a new extent.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `width * height`.
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Returns the lower-left corner of a rectangle of this extent centered at `center`.
    pub fn lower_left(self, center: Point) -> Point {
        Point::new(center.x - 0.5 * self.width, center.y - 0.5 * self.height)
    }

    /// Returns the upper-right corner of a rectangle of this extent centered at `center`.
    pub fn upper_right(self, center: Point) -> Point {
        Point::new(center.x + 0.5 * self.width, center.y + 0.5 * self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_square() {
        assert_eq!(Dimensions::new(20.0, 20.0).area(), 400.0);
    }

    #[test]
    fn corners_around_center() {
        let dims = Dimensions::new(10.0, 4.0);
        let center = Point::new(50.0, 20.0);
        assert_eq!(dims.lower_left(center), Point::new(45.0, 18.0));
        assert_eq!(dims.upper_right(center), Point::new(55.0, 22.0));
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_string(&Dimensions::new(3.5, 2.0)).unwrap();
        assert_eq!(json, r#"{"width":3.5,"height":2.0}"#);
        let back: Point = serde_json::from_str(r#"{"x":1.0,"y":-4.0}"#).unwrap();
        assert_eq!(back, Point::new(1.0, -4.0));
    }
}

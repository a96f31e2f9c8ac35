//! Geometric primitives for diagram reconstruction.
//!
//! All coordinates live in a single screen space: x grows to the right,
//! y grows downward, units are CSS pixels.

use serde::{Deserialize, Serialize};

/// A 2D point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in screen space.
///
/// Serialized with `left`/`top` keys so that bounding rectangles reported by
/// a host surface can be read as-is; `x`/`y` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    #[serde(rename = "left", alias = "x")]
    pub x: f32,
    /// Y coordinate of top-left corner
    #[serde(rename = "top", alias = "y")]
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let center = rect.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// True when the rectangle has no laid-out area (zero or non-finite extent).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.x.is_finite()
            && self.y.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Check if this rectangle contains a point. Edges are inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::geometry::{Rect, Point};
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(rect.contains_point(&Point::new(50.0, 50.0)));
    /// assert!(!rect.contains_point(&Point::new(150.0, 150.0)));
    /// ```
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Euclidean distance from a point to the nearest edge of the rectangle.
    ///
    /// Zero when the point lies inside. On each axis the gap is zero when the
    /// point falls within the rectangle's span, so a point beside the
    /// rectangle gets the perpendicular distance and a point off a corner
    /// gets the distance to that corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::geometry::{Rect, Point};
    ///
    /// let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// assert_eq!(rect.distance_to_point(&Point::new(5.0, 5.0)), 0.0);
    /// assert_eq!(rect.distance_to_point(&Point::new(20.0, 5.0)), 10.0);
    /// assert_eq!(rect.distance_to_point(&Point::new(13.0, 14.0)), 5.0);
    /// ```
    pub fn distance_to_point(&self, p: &Point) -> f32 {
        let dx = (self.left() - p.x).max(0.0).max(p.x - self.right());
        let dy = (self.top() - p.y).max(0.0).max(p.y - self.bottom());
        (dx * dx + dy * dy).sqrt()
    }
}

/// Compute the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use diagram_oxide::geometry::{Point, euclidean_distance};
///
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(euclidean_distance(&p1, &p2), 5.0);
/// ```
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f32 {
    ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_rect_from_points() {
        let r = Rect::from_points(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_rect_contains_point_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains_point(&Point::new(0.0, 0.0)));
        assert!(r.contains_point(&Point::new(100.0, 100.0)));
        assert!(!r.contains_point(&Point::new(100.1, 50.0)));
    }

    #[test]
    fn test_distance_to_point() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        // inside
        assert_eq!(r.distance_to_point(&Point::new(20.0, 10.0)), 0.0);
        // perpendicular, right of box
        assert_eq!(r.distance_to_point(&Point::new(140.0, 10.0)), 100.0);
        // perpendicular, above box
        assert_eq!(r.distance_to_point(&Point::new(10.0, -7.0)), 7.0);
        // off the bottom-right corner
        assert_eq!(r.distance_to_point(&Point::new(43.0, 24.0)), 5.0);
    }

    #[test]
    fn test_degenerate_rect() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_degenerate());
        assert!(Rect::new(f32::NAN, 0.0, 10.0, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_rect_serde_uses_left_top() {
        let r: Rect =
            serde_json::from_str(r#"{"left": 5, "top": 6, "width": 7, "height": 8}"#).unwrap();
        assert_eq!(r, Rect::new(5.0, 6.0, 7.0, 8.0));

        let aliased: Rect =
            serde_json::from_str(r#"{"x": 1, "y": 2, "width": 3, "height": 4}"#).unwrap();
        assert_eq!(aliased, Rect::new(1.0, 2.0, 3.0, 4.0));

        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"left\""));
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0)), 5.0);
        assert_eq!(euclidean_distance(&Point::new(1.0, 1.0), &Point::new(1.0, 1.0)), 0.0);
    }
}

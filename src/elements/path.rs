//! Stroke path element types.
//!
//! This module provides the `StrokePath` type for vector connectors drawn on
//! the surface, and the `StrokeGeometry` trait through which edge inference
//! measures and samples them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{euclidean_distance, Point, Rect};

/// Number of straight segments used to approximate one cubic Bézier.
const CURVE_SEGMENTS: usize = 16;

/// Measurable stroke geometry.
///
/// Implemented by [`StrokePath`]; hosts that can measure live elements
/// directly may implement it themselves. Any method may fail with
/// [`Error::GeometryFault`] when the underlying element is detached or
/// malformed.
pub trait StrokeGeometry {
    /// Bounding box in screen space.
    fn bbox(&self) -> Rect;

    /// Computed `fill` value, if the host reported one.
    fn fill(&self) -> Option<&str>;

    /// Total drawn length in pixels.
    fn total_length(&self) -> Result<f32>;

    /// Absolute screen point at `fraction` (0.0 to 1.0) of the drawn length.
    fn point_at_fraction(&self, fraction: f32) -> Result<Point>;
}

/// A single path operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathOperation {
    /// Move to a point, starting a new subpath
    MoveTo(f32, f32),
    /// Line to a point
    LineTo(f32, f32),
    /// Cubic Bezier curve to a point
    /// (control1_x, control1_y, control2_x, control2_y, end_x, end_y)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Rectangle as a closed subpath
    /// (x, y, width, height)
    Rectangle(f32, f32, f32, f32),
    /// Close the current subpath
    ClosePath,
}

/// A vector stroke captured from the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStrokePath")]
pub struct StrokePath {
    /// Bounding box of the path
    pub bbox: Rect,
    /// Path operations in absolute screen coordinates
    pub operations: Vec<PathOperation>,
    /// Computed fill (`none` when the path is stroke-only)
    pub fill: Option<String>,
}

/// Wire form of a stroke; the bounding box may be omitted and is then
/// derived from the operations.
#[derive(Deserialize)]
struct RawStrokePath {
    #[serde(default, alias = "boundingBox")]
    bbox: Option<Rect>,
    #[serde(default)]
    operations: Vec<PathOperation>,
    #[serde(default)]
    fill: Option<String>,
}

impl From<RawStrokePath> for StrokePath {
    fn from(raw: RawStrokePath) -> Self {
        let bbox = raw
            .bbox
            .unwrap_or_else(|| StrokePath::compute_bbox(&raw.operations));
        Self {
            bbox,
            operations: raw.operations,
            fill: raw.fill,
        }
    }
}

impl StrokePath {
    /// Create a path from operations, deriving its bounding box.
    pub fn from_operations(operations: Vec<PathOperation>) -> Self {
        let bbox = Self::compute_bbox(&operations);
        Self {
            bbox,
            operations,
            fill: None,
        }
    }

    /// Create a straight line path from (x1, y1) to (x2, y2).
    ///
    /// # Examples
    ///
    /// ```
    /// use diagram_oxide::elements::{StrokeGeometry, StrokePath};
    ///
    /// let line = StrokePath::line(0.0, 0.0, 30.0, 40.0);
    /// assert_eq!(line.total_length().unwrap(), 50.0);
    /// ```
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::from_operations(vec![PathOperation::MoveTo(x1, y1), PathOperation::LineTo(x2, y2)])
    }

    /// Create a single cubic Bézier connector.
    pub fn curve(start: Point, c1: Point, c2: Point, end: Point) -> Self {
        Self::from_operations(vec![
            PathOperation::MoveTo(start.x, start.y),
            PathOperation::CurveTo(c1.x, c1.y, c2.x, c2.y, end.x, end.y),
        ])
    }

    /// Set the computed fill.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Whether the path paints a visible fill.
    pub fn has_visible_fill(&self) -> bool {
        has_visible_fill(self.fill.as_deref())
    }

    /// Flatten the path into straight drawn segments.
    ///
    /// Moves between subpaths are not drawn and contribute no segment.
    fn segments(&self) -> Result<Vec<(Point, Point)>> {
        let mut segments = Vec::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for op in &self.operations {
            match *op {
                PathOperation::MoveTo(x, y) => {
                    let p = finite_point(x, y)?;
                    current = Some(p);
                    subpath_start = Some(p);
                },
                PathOperation::LineTo(x, y) => {
                    let p = finite_point(x, y)?;
                    match current {
                        Some(from) => segments.push((from, p)),
                        // A LineTo without a current point starts the subpath
                        None => subpath_start = Some(p),
                    }
                    current = Some(p);
                },
                PathOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    let c1 = finite_point(x1, y1)?;
                    let c2 = finite_point(x2, y2)?;
                    let end = finite_point(x3, y3)?;
                    let start = current.unwrap_or(c1);
                    if current.is_none() {
                        subpath_start = Some(start);
                    }
                    let mut prev = start;
                    for i in 1..=CURVE_SEGMENTS {
                        let t = i as f32 / CURVE_SEGMENTS as f32;
                        let p = cubic_point(start, c1, c2, end, t);
                        segments.push((prev, p));
                        prev = p;
                    }
                    current = Some(end);
                },
                PathOperation::Rectangle(x, y, w, h) => {
                    let p0 = finite_point(x, y)?;
                    let p1 = finite_point(x + w, y)?;
                    let p2 = finite_point(x + w, y + h)?;
                    let p3 = finite_point(x, y + h)?;
                    segments.extend([(p0, p1), (p1, p2), (p2, p3), (p3, p0)]);
                    current = Some(p0);
                    subpath_start = Some(p0);
                },
                PathOperation::ClosePath => {
                    if let (Some(from), Some(to)) = (current, subpath_start) {
                        if from != to {
                            segments.push((from, to));
                        }
                        current = Some(to);
                    }
                },
            }
        }

        Ok(segments)
    }

    /// Compute bounding box from path operations.
    pub fn compute_bbox(operations: &[PathOperation]) -> Rect {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        let mut include = |x: f32, y: f32| {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        };

        for op in operations {
            match *op {
                PathOperation::MoveTo(x, y) | PathOperation::LineTo(x, y) => include(x, y),
                PathOperation::CurveTo(x1, y1, x2, y2, x3, y3) => {
                    include(x1, y1);
                    include(x2, y2);
                    include(x3, y3);
                },
                PathOperation::Rectangle(x, y, w, h) => {
                    include(x, y);
                    include(x + w, y + h);
                },
                PathOperation::ClosePath => {},
            }
        }

        if min_x == f32::MAX {
            Rect::new(0.0, 0.0, 0.0, 0.0)
        } else {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        }
    }
}

impl StrokeGeometry for StrokePath {
    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }

    fn total_length(&self) -> Result<f32> {
        Ok(self
            .segments()?
            .iter()
            .map(|(a, b)| euclidean_distance(a, b))
            .sum())
    }

    fn point_at_fraction(&self, fraction: f32) -> Result<Point> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::GeometryFault(format!(
                "sample fraction {} outside [0, 1]",
                fraction
            )));
        }

        let segments = self.segments()?;
        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(Error::GeometryFault(
                    "path has no drawable segments".to_string(),
                ))
            },
        };

        // Drawn extremities, not interpolated
        if fraction == 0.0 {
            return Ok(first.0);
        }
        if fraction == 1.0 {
            return Ok(last.1);
        }

        let total: f32 = segments.iter().map(|(a, b)| euclidean_distance(a, b)).sum();
        let mut remaining = total * fraction;
        for (a, b) in &segments {
            let len = euclidean_distance(a, b);
            if remaining <= len && len > 0.0 {
                let t = remaining / len;
                return Ok(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
            }
            remaining -= len;
        }
        Ok(last.1)
    }
}

/// Whether a computed `fill` value paints anything.
pub fn has_visible_fill(fill: Option<&str>) -> bool {
    match fill.map(str::trim) {
        None | Some("") => false,
        Some(f) => !(f.eq_ignore_ascii_case("none") || f.eq_ignore_ascii_case("transparent")),
    }
}

fn finite_point(x: f32, y: f32) -> Result<Point> {
    let p = Point::new(x, y);
    if p.is_finite() {
        Ok(p)
    } else {
        Err(Error::GeometryFault(format!("non-finite coordinate ({}, {})", x, y)))
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_operations() {
        let ops = vec![
            PathOperation::MoveTo(10.0, 10.0),
            PathOperation::LineTo(50.0, 10.0),
            PathOperation::LineTo(50.0, 50.0),
            PathOperation::LineTo(10.0, 50.0),
            PathOperation::ClosePath,
        ];

        let path = StrokePath::from_operations(ops);

        assert_eq!(path.bbox, Rect::new(10.0, 10.0, 40.0, 40.0));
        assert_eq!(path.total_length().unwrap(), 160.0);
    }

    #[test]
    fn test_line_endpoints() {
        let line = StrokePath::line(100.0, 20.0, 10.0, 20.0);
        assert_eq!(line.point_at_fraction(0.0).unwrap(), Point::new(100.0, 20.0));
        assert_eq!(line.point_at_fraction(1.0).unwrap(), Point::new(10.0, 20.0));
        assert_eq!(line.point_at_fraction(0.5).unwrap(), Point::new(55.0, 20.0));
    }

    #[test]
    fn test_curve_endpoints_are_drawn_extremities() {
        // Control points stick far out of the chord; the bbox corners are
        // not the endpoints.
        let curve = StrokePath::curve(
            Point::new(0.0, 0.0),
            Point::new(0.0, 200.0),
            Point::new(100.0, -200.0),
            Point::new(100.0, 0.0),
        );
        assert_eq!(curve.point_at_fraction(0.0).unwrap(), Point::new(0.0, 0.0));
        assert_eq!(curve.point_at_fraction(1.0).unwrap(), Point::new(100.0, 0.0));
        assert!(curve.total_length().unwrap() > 100.0);
        assert_eq!(curve.bbox.height, 400.0);
    }

    #[test]
    fn test_empty_path_faults_on_sampling() {
        let path = StrokePath::from_operations(vec![PathOperation::MoveTo(5.0, 5.0)]);
        assert_eq!(path.total_length().unwrap(), 0.0);
        assert!(matches!(path.point_at_fraction(0.0), Err(Error::GeometryFault(_))));
    }

    #[test]
    fn test_non_finite_coordinates_fault() {
        let path = StrokePath::from_operations(vec![
            PathOperation::MoveTo(0.0, 0.0),
            PathOperation::LineTo(f32::NAN, 3.0),
        ]);
        assert!(matches!(path.total_length(), Err(Error::GeometryFault(_))));
    }

    #[test]
    fn test_fraction_out_of_range_faults() {
        let line = StrokePath::line(0.0, 0.0, 10.0, 0.0);
        assert!(line.point_at_fraction(1.5).is_err());
        assert!(line.point_at_fraction(f32::NAN).is_err());
    }

    #[test]
    fn test_rectangle_bbox_and_length() {
        let rect =
            StrokePath::from_operations(vec![PathOperation::Rectangle(20.0, 30.0, 100.0, 50.0)]);
        assert_eq!(rect.bbox, Rect::new(20.0, 30.0, 100.0, 50.0));
        assert_eq!(rect.total_length().unwrap(), 300.0);
    }

    #[test]
    fn test_visible_fill() {
        assert!(!has_visible_fill(None));
        assert!(!has_visible_fill(Some("none")));
        assert!(!has_visible_fill(Some(" Transparent ")));
        assert!(has_visible_fill(Some("rgb(0, 0, 0)")));
        assert!(StrokePath::line(0.0, 0.0, 1.0, 1.0).with_fill("#fff").has_visible_fill());
    }

    #[test]
    fn test_deserialize_without_bbox() {
        let json = r#"{"operations": [{"MoveTo": [0, 0]}, {"LineTo": [40, 30]}], "fill": "none"}"#;
        let path: StrokePath = serde_json::from_str(json).unwrap();
        assert_eq!(path.bbox, Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(path.fill.as_deref(), Some("none"));
        assert_eq!(path.total_length().unwrap(), 50.0);
    }
}

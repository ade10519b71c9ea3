//! Points and the measurements the toolpath pipeline relies on.
//!
//! Only the planar X/Y components take part in ordering and spacing
//! decisions. A height component is carried through untouched.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D or 3D coordinate in millimeters
///
/// Serialized as a JSON array of two or three numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Height, present when the slicer produced 3D points
    pub z: Option<f64>,
}

impl Point {
    /// Creates a planar point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a point with a height component.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// The same point without its height component.
    pub fn planar(&self) -> Self {
        Self::new(self.x, self.y)
    }

    /// Distance in the XY plane, ignoring any height.
    pub fn planar_distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Euclidean distance, in 3D when both points carry a height.
    pub fn distance(&self, other: &Point) -> f64 {
        match (self.z, other.z) {
            (Some(z1), Some(z2)) => {
                let dx = other.x - self.x;
                let dy = other.y - self.y;
                let dz = z2 - z1;
                (dx * dx + dy * dy + dz * dz).sqrt()
            }
            _ => self.planar_distance(other),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, z),
            None => write!(f, "({:.3}, {:.3})", self.x, self.y),
        }
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = GeometryError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GeometryError::NonFinite { index, value });
        }
        match values.as_slice() {
            [x, y] => Ok(Point::new(*x, *y)),
            [x, y, z] => Ok(Point::with_z(*x, *y, *z)),
            other => Err(GeometryError::InvalidDimension { count: other.len() }),
        }
    }
}

impl From<Point> for Vec<f64> {
    fn from(p: Point) -> Self {
        match p.z {
            Some(z) => vec![p.x, p.y, z],
            None => vec![p.x, p.y],
        }
    }
}

/// Total length of consecutive segments. Zero for fewer than two points.
pub fn arc_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Index of the point planar-nearest to `reference`.
///
/// Ties go to the lowest index. Returns `None` for an empty slice.
pub fn nearest_index(points: &[Point], reference: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = p.planar_distance(reference);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Linear interpolation `p1 + (p2 - p1) * fraction`.
///
/// `fraction` must lie in `[0, 1]`. The height is interpolated when both
/// points carry one, otherwise the height of `p1` is kept.
pub fn interpolate(p1: &Point, p2: &Point, fraction: f64) -> Point {
    debug_assert!((0.0..=1.0).contains(&fraction), "fraction {fraction} out of range");
    let z = match (p1.z, p2.z) {
        (Some(z1), Some(z2)) => Some(z1 + (z2 - z1) * fraction),
        (z1, _) => z1,
    };
    Point {
        x: p1.x + (p2.x - p1.x) * fraction,
        y: p1.y + (p2.y - p1.y) * fraction,
        z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_arc_length() {
        assert_eq!(arc_length(&square()), 40.0);
        assert_eq!(arc_length(&[Point::new(1.0, 1.0)]), 0.0);
        assert_eq!(arc_length(&[]), 0.0);
    }

    #[test]
    fn test_arc_length_uses_height() {
        let pts = [Point::with_z(0.0, 0.0, 0.0), Point::with_z(3.0, 0.0, 4.0)];
        assert_eq!(arc_length(&pts), 5.0);
        assert_eq!(pts[0].planar_distance(&pts[1]), 3.0);
    }

    #[test]
    fn test_nearest_index() {
        let pts = square();
        assert_eq!(nearest_index(&pts, &Point::new(9.0, 9.0)), Some(2));
        assert_eq!(nearest_index(&pts, &Point::new(-1.0, 11.0)), Some(3));
        assert_eq!(nearest_index(&[], &Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_nearest_index_prefers_first_on_tie() {
        // (0,0) appears at index 0 and 4
        assert_eq!(nearest_index(&square(), &Point::new(0.0, 0.0)), Some(0));
        // Equidistant from index 0 and 1
        assert_eq!(nearest_index(&square(), &Point::new(5.0, -1.0)), Some(0));
    }

    #[test]
    fn test_nearest_index_ignores_height() {
        let pts = [Point::with_z(0.0, 0.0, 100.0), Point::with_z(5.0, 0.0, 0.0)];
        assert_eq!(nearest_index(&pts, &Point::with_z(1.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn test_interpolate() {
        let p = interpolate(&Point::new(0.0, 10.0), &Point::new(0.0, 0.0), 0.5);
        assert_eq!(p, Point::new(0.0, 5.0));

        let p = interpolate(
            &Point::with_z(0.0, 0.0, 2.0),
            &Point::with_z(4.0, 0.0, 6.0),
            0.25,
        );
        assert_eq!(p, Point::with_z(1.0, 0.0, 3.0));
    }

    #[test]
    fn test_point_from_array() {
        let p: Point = serde_json::from_str("[1.5, 2.0]").unwrap();
        assert_eq!(p, Point::new(1.5, 2.0));

        let p: Point = serde_json::from_str("[1.0, 2.0, 30.0]").unwrap();
        assert_eq!(p, Point::with_z(1.0, 2.0, 30.0));

        assert!(serde_json::from_str::<Point>("[1.0]").is_err());
        assert!(serde_json::from_str::<Point>("[1.0, 2.0, 3.0, 4.0]").is_err());
    }

    #[test]
    fn test_point_to_array() {
        assert_eq!(
            serde_json::to_string(&Point::new(1.0, 2.0)).unwrap(),
            "[1.0,2.0]"
        );
        assert_eq!(
            serde_json::to_string(&Point::with_z(1.0, 2.0, 3.0)).unwrap(),
            "[1.0,2.0,3.0]"
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Point::try_from(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, GeometryError::NonFinite { index: 1, .. }));
    }
}

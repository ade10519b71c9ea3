//! Contour rings and open polylines.
//!
//! A [`Contour`] is one closed loop as traced by the slicer. It never stores
//! a duplicated closing point: closure is always an implicit wraparound from
//! the last point back to the first. A [`Polyline`] is an open path whose
//! points are walked exactly as stored. Start-point rotation is the step that
//! turns the former into the latter.

use crate::geometry::{arc_length, Point};
use serde::{Deserialize, Serialize};

/// A closed contour ring without a duplicated closing point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Builds a ring from raw slicer points.
    ///
    /// A trailing point that repeats the first one is dropped.
    pub fn from_points(mut points: Vec<Point>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_point(&self) -> Option<&Point> {
        self.points.first()
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

impl From<Contour> for Vec<Point> {
    fn from(c: Contour) -> Self {
        c.points
    }
}

/// An open path walked point by point
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        arc_length(&self.points)
    }

    /// A polyline needs at least two points to produce any motion.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

//! Start-point rotation
//!
//! Re-bases a contour ring so that it begins at the point nearest a
//! reference. The output is an open polyline that walks the whole ring and
//! returns to its pivot, so the closing edge is part of the path.

use layerpath_core::{nearest_index, Contour, Point, Polyline};

/// Rotates `contour` to start at its point planar-nearest to `reference`.
///
/// Returns the rotated path together with the chosen pivot, or `None` for an
/// empty contour. A single-point contour is returned unchanged.
pub fn rotate_to_nearest(contour: &Contour, reference: &Point) -> Option<(Polyline, Point)> {
    let ring = contour.points();
    let pivot_index = nearest_index(ring, reference)?;
    let pivot = ring[pivot_index];

    if ring.len() == 1 {
        return Some((Polyline::from_points(vec![pivot]), pivot));
    }

    let mut points = Vec::with_capacity(ring.len() + 1);
    points.extend_from_slice(&ring[pivot_index..]);
    points.extend_from_slice(&ring[..pivot_index]);
    points.push(pivot);

    Some((Polyline::from_points(points), pivot))
}

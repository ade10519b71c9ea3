//! Spacing decimation
//!
//! Drops interior points that sit closer than a minimum planar distance to
//! the last point kept. Endpoints always survive.

use layerpath_core::Polyline;

/// Greedy forward filter keeping points at least `min_spacing` apart.
pub fn decimate(path: &Polyline, min_spacing: f64) -> Polyline {
    let points = path.points();
    let [first, interior @ .., last] = points else {
        return path.clone();
    };

    let mut kept = Vec::with_capacity(points.len());
    kept.push(*first);
    let mut anchor = *first;
    for p in interior {
        if p.planar_distance(&anchor) >= min_spacing {
            kept.push(*p);
            anchor = *p;
        }
    }
    kept.push(*last);

    Polyline::from_points(kept)
}

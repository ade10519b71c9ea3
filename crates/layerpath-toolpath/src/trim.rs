//! Tail trimming
//!
//! Shortens a path by a fixed arc length at its end so a closed loop stops
//! just short of its own seam.

use layerpath_core::{interpolate, Polyline};

/// Removes the last `distance` millimeters of `path`.
///
/// The final point is interpolated on the segment that straddles the cut, so
/// the result is exactly `length - distance` long. A path no longer than
/// `distance` is returned unmodified.
pub fn trim_tail(path: &Polyline, distance: f64) -> Polyline {
    let total = path.length();
    if total <= distance {
        return path.clone();
    }

    let points = path.points();
    let Some(first) = points.first() else {
        return path.clone();
    };

    let cutoff = total - distance;
    let mut trimmed = Vec::with_capacity(points.len());
    trimmed.push(*first);
    let mut walked = 0.0;

    for (p1, p2) in path.segments() {
        let step = p1.distance(p2);
        if walked + step >= cutoff {
            // step > 0 here because walked < cutoff
            let fraction = ((cutoff - walked) / step).clamp(0.0, 1.0);
            trimmed.push(interpolate(p1, p2, fraction));
            break;
        }
        trimmed.push(*p2);
        walked += step;
    }

    Polyline::from_points(trimmed)
}

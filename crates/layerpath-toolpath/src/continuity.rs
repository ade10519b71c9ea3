//! Cross-layer seam continuity
//!
//! Remembers where the previous layer started so the next layer can begin
//! close to it, keeping successive seams stacked and travel short.

use layerpath_core::{Contour, Point};
use tracing::trace;

/// Continuity state carried from one layer to the next
#[derive(Debug, Clone, Default)]
pub struct ContinuityTracker {
    enabled: bool,
    last_start: Option<Point>,
    recorded_this_layer: bool,
}

impl ContinuityTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    /// Planar start point recorded by the most recent layer, if any.
    pub fn last_start(&self) -> Option<Point> {
        self.last_start
    }

    /// Opens a new layer. The recorded start may be updated once until the
    /// next call.
    pub fn begin_layer(&mut self) {
        self.recorded_this_layer = false;
    }

    /// Reference point for the rotator in the current layer.
    ///
    /// The previous layer's start when continuity is enabled and one exists,
    /// otherwise the fixed reference.
    pub fn reference_for_layer(&self, fixed: &Point) -> Point {
        match self.last_start {
            Some(previous) if self.enabled => previous,
            _ => fixed.planar(),
        }
    }

    /// Processing order for the contours of the current layer.
    ///
    /// With continuity enabled and a previous start known, the contour whose
    /// first point is planar-nearest to that start moves to the front. All
    /// others keep their relative order.
    pub fn order_contours<'a>(&self, contours: &'a [Contour]) -> Vec<&'a Contour> {
        let mut ordered: Vec<&Contour> = contours.iter().collect();
        let Some(previous) = self.last_start.filter(|_| self.enabled) else {
            return ordered;
        };

        let mut best: Option<(usize, f64)> = None;
        for (i, contour) in contours.iter().enumerate() {
            let Some(first) = contour.first_point() else {
                continue;
            };
            let d = first.planar_distance(&previous);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }

        if let Some((index, _)) = best {
            let chosen = ordered.remove(index);
            ordered.insert(0, chosen);
            trace!("Contour {} moved first for continuity", index);
        }
        ordered
    }

    /// Records the start of the first contour emitted in this layer.
    ///
    /// A first contour that emits nothing never reaches here, so the role
    /// passes to the next contour that does. Returns `false` if a start was
    /// already recorded for the layer.
    pub fn record(&mut self, start: &Point) -> bool {
        if self.recorded_this_layer {
            return false;
        }
        self.last_start = Some(start.planar());
        self.recorded_this_layer = true;
        true
    }
}

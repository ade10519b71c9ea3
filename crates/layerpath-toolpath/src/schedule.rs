//! Layer height schedule

/// Heights `h, 2h, 3h, ...` strictly below `trunc(z_max) + 1`.
///
/// The count is fixed up front and each height computed as `h + i * h`, so
/// no floating point error accumulates across a tall model. Returns an empty
/// schedule when `h` is not positive or `z_max` is not finite.
pub fn layer_heights(layer_height: f64, z_max: f64) -> Vec<f64> {
    if layer_height.is_nan() || layer_height <= 0.0 || !z_max.is_finite() {
        return Vec::new();
    }

    let stop = z_max.trunc() + 1.0;
    let span = (stop - layer_height) / layer_height;
    if span <= 0.0 {
        return Vec::new();
    }

    let count = span.ceil() as usize;
    (0..count)
        .map(|i| layer_height + i as f64 * layer_height)
        .collect()
}

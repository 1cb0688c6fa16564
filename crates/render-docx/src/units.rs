//! Point conversions for WordprocessingML measurements.

/// Twentieths of a point, used for page size, margins and indents.
pub fn twips(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// English Metric Units, used for drawing extents.
pub fn emu(points: f32) -> i64 {
    (points * 12_700.0).round() as i64
}

/// Run font sizes are in half-points.
pub fn half_points(points: f32) -> i64 {
    (points * 2.0).round() as i64
}

use super::Vec3;

/// Handle pair for one knot of a poly-Bézier curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handles {
    pub left: Vec3,
    pub right: Vec3,
}

/// Compute smooth automatic handles for a run of knots.
///
/// The tangent at an interior knot is parallel to the chord between its
/// neighbours; each handle reaches one third of the adjacent span. End knots
/// point straight at their only neighbour.
pub fn auto_handles(points: &[Vec3]) -> Vec<Handles> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p = points[i];
            let prev = if i > 0 { Some(points[i - 1]) } else { None };
            let next = points.get(i + 1).copied();

            let tangent = match (prev, next) {
                (Some(a), Some(b)) => (b - a).normalize(),
                (None, Some(b)) => (b - p).normalize(),
                (Some(a), None) => (p - a).normalize(),
                (None, None) => Vec3::ZERO,
            };

            let left_len = prev.map_or(0.0, |a| p.distance(&a) / 3.0);
            let right_len = next.map_or(0.0, |b| p.distance(&b) / 3.0);

            Handles {
                left: p - tangent.scale(left_len),
                right: p + tangent.scale(right_len),
            }
        })
        .collect()
}

/// Evaluate a cubic Bézier span at t in [0, 1]
pub fn evaluate_bezier(p0: Vec3, h0: Vec3, h1: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0.scale(u * u * u) + h0.scale(3.0 * u * u * t) + h1.scale(3.0 * u * t * t) + p1.scale(t * t * t)
}

use super::mesh::{connect_rings, create_ring, Mesh};
use crate::math::{auto_handles, evaluate_bezier, Vec3};

/// Samples per span when a host tessellates the curve
pub const CURVE_RESOLUTION: usize = 12;
/// Vertices around the tube profile (a round bevel at resolution 3)
pub const RADIAL_SEGMENTS: usize = 16;

/// Knot of a branch curve with its automatic Bézier handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Vec3,
    pub radius: f32,
    pub handle_left: Vec3,
    pub handle_right: Vec3,
}

/// One continuous run of segments at a single depth, ready to be beveled
#[derive(Debug, Clone, PartialEq)]
pub struct BranchCurve {
    pub points: Vec<CurvePoint>,
    pub depth: usize,
    pub bevel_depth: f32,
}

impl BranchCurve {
    /// Build from knot positions and radii
    pub fn from_knots(knots: &[(Vec3, f32)], depth: usize, bevel_depth: f32) -> Self {
        let positions: Vec<Vec3> = knots.iter().map(|(p, _)| *p).collect();
        let points = auto_handles(&positions)
            .into_iter()
            .zip(knots)
            .map(|(handles, &(position, radius))| CurvePoint {
                position,
                radius,
                handle_left: handles.left,
                handle_right: handles.right,
            })
            .collect();

        Self {
            points,
            depth,
            bevel_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of Bézier spans
    pub fn span_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Tube radius at a knot once the bevel is applied
    pub fn thickness_at(&self, index: usize) -> f32 {
        self.points
            .get(index)
            .map_or(0.0, |p| p.radius * self.bevel_depth)
    }

    /// Sample every span at `resolution` steps.
    ///
    /// Returns `(position, radius)` pairs; the radius is interpolated
    /// linearly along each span.
    pub fn sample(&self, resolution: usize) -> Vec<(Vec3, f32)> {
        let resolution = resolution.max(1);
        let mut samples = Vec::with_capacity(self.span_count() * resolution + 1);

        for pair in self.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for step in 0..resolution {
                let t = step as f32 / resolution as f32;
                let position = evaluate_bezier(a.position, a.handle_right, b.handle_left, b.position, t);
                samples.push((position, a.radius + (b.radius - a.radius) * t));
            }
        }
        if let Some(last) = self.points.last() {
            samples.push((last.position, last.radius));
        }

        samples
    }

    /// Sweep a tube of radius `bevel_depth * radius` along the sampled curve
    pub fn to_mesh(&self, resolution: usize, radial_segments: usize) -> Mesh {
        let mut mesh = Mesh::new();
        let samples = self.sample(resolution);
        if samples.len() < 2 || radial_segments < 3 {
            return mesh;
        }

        let last = samples.len() - 1;
        let mut prev_ring = None;
        for (i, &(center, radius)) in samples.iter().enumerate() {
            let direction = if i == 0 {
                samples[1].0 - samples[0].0
            } else if i == last {
                samples[last].0 - samples[last - 1].0
            } else {
                samples[i + 1].0 - samples[i - 1].0
            };

            let ring = create_ring(
                center,
                direction.normalize(),
                radius * self.bevel_depth,
                radial_segments,
                i as f32 / last as f32,
            );
            let ring_start = mesh.add_vertices(ring);

            if let Some(prev) = prev_ring {
                connect_rings(&mut mesh, prev, ring_start, radial_segments);
            }
            prev_ring = Some(ring_start);
        }

        mesh
    }
}

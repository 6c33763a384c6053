use std::f32::consts::TAU;

use super::curve::BranchCurve;
use super::leaf::LeafInstance;
use super::mesh::Mesh;
use crate::error::{Result, TreeError};
use crate::math::{Mat3, Vec3};
use crate::turtle::state::{non_negative, positive};
use crate::turtle::{BranchSegment, LeafMarker};
use crate::variation::{RandomSource, SeededRandom};

/// Segments whose endpoints are closer than this are treated as joined
const CONTINUITY_EPSILON: f32 = 1e-5;

/// Maximum tilt of a leaf off its branch frame (radians)
const LEAF_TILT: f32 = 0.3;

/// Parameters for turning a turtle trace into renderable primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyParams {
    /// Tube radius per unit of branch radius
    pub bevel_depth: f32,
    pub add_leaves: bool,
    /// Uniform scale of each leaf instance
    pub leaf_size: f32,
    /// Seed of the run; leaf twist uses the stream at `seed + 1`
    pub seed: u64,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            bevel_depth: 0.05,
            add_leaves: true,
            leaf_size: 0.3,
            seed: 42,
        }
    }
}

impl AssemblyParams {
    pub fn validate(&self) -> Result<()> {
        positive("bevel_depth", self.bevel_depth)?;
        if self.add_leaves {
            positive("leaf_size", self.leaf_size)?;
        } else {
            non_negative("leaf_size", self.leaf_size)?;
        }
        Ok(())
    }
}

/// Renderable description of a tree: beveled branch curves plus leaf placements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeGeometry {
    pub curves: Vec<BranchCurve>,
    pub leaves: Vec<LeafInstance>,
}

impl TreeGeometry {
    pub fn point_count(&self) -> usize {
        self.curves.iter().map(BranchCurve::len).sum()
    }

    /// Axis-aligned bounds of every curve knot and leaf origin
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p.position))
            .chain(self.leaves.iter().map(|l| l.position));

        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (
                Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// All branch tubes merged into one mesh
    pub fn branch_mesh(&self, resolution: usize, radial_segments: usize) -> Mesh {
        let mut mesh = Mesh::new();
        for curve in &self.curves {
            mesh.merge(&curve.to_mesh(resolution, radial_segments));
        }
        mesh
    }

    /// Every leaf instance baked into one mesh using `template`
    pub fn leaf_mesh(&self, template: &Mesh) -> Mesh {
        let mut mesh = Mesh::new();
        for leaf in &self.leaves {
            mesh.merge(&template.transformed(&leaf.matrix()));
        }
        mesh
    }
}

/// Convert a turtle trace into branch curves and leaf instances.
///
/// Consecutive segments at the same depth that continue exactly where the
/// previous one ended share a curve; a depth change or a gap starts a new
/// one. Curves with fewer than two knots are dropped.
pub fn assemble(
    segments: &[BranchSegment],
    leaves: &[LeafMarker],
    params: &AssemblyParams,
) -> Result<TreeGeometry> {
    params.validate()?;

    let curves = group_segments(segments, params.bevel_depth);
    let leaves = if params.add_leaves {
        place_leaves(leaves, params)
    } else {
        Vec::new()
    };

    tracing::debug!(
        segments = segments.len(),
        curves = curves.len(),
        leaves = leaves.len(),
        "assembled tree geometry"
    );

    Ok(TreeGeometry { curves, leaves })
}

fn group_segments(segments: &[BranchSegment], bevel_depth: f32) -> Vec<BranchCurve> {
    let mut curves = Vec::new();
    let mut knots: Vec<(Vec3, f32)> = Vec::new();
    let mut depth = 0;

    for seg in segments {
        let continues = knots
            .last()
            .is_some_and(|&(end, _)| depth == seg.depth && end.distance(&seg.start) <= CONTINUITY_EPSILON);

        if !continues {
            flush(&mut curves, &mut knots, depth, bevel_depth);
            knots.push((seg.start, seg.start_radius));
            depth = seg.depth;
        }
        knots.push((seg.end, seg.end_radius));
    }
    flush(&mut curves, &mut knots, depth, bevel_depth);

    curves
}

fn flush(curves: &mut Vec<BranchCurve>, knots: &mut Vec<(Vec3, f32)>, depth: usize, bevel_depth: f32) {
    if knots.len() >= 2 {
        curves.push(BranchCurve::from_knots(knots, depth, bevel_depth));
    }
    knots.clear();
}

fn place_leaves(markers: &[LeafMarker], params: &AssemblyParams) -> Vec<LeafInstance> {
    let mut rng = SeededRandom::new(params.seed.wrapping_add(1));

    markers
        .iter()
        .map(|marker| {
            let tilt_x = rng.uniform(-LEAF_TILT, LEAF_TILT);
            let tilt_y = rng.uniform(-LEAF_TILT, LEAF_TILT);
            let spin = rng.uniform(0.0, TAU);
            let twist = Mat3::from_euler_xyz(tilt_x, tilt_y, spin);

            LeafInstance {
                position: marker.jittered_position(),
                rotation: twist.mul(&marker.orientation),
                scale: params.leaf_size,
                depth: marker.depth,
            }
        })
        .collect()
}

use std::f32::consts::{FRAC_PI_4, PI};

use crate::error::{Result, TreeError};
use crate::math::{Mat3, Vec3};

/// Upper bound on `rotation_jitter` (45°)
pub const MAX_ROTATION_JITTER: f32 = FRAC_PI_4;
/// Upper bound on `branch_spread` (180°)
pub const MAX_BRANCH_SPREAD: f32 = PI;
pub const MAX_TROPISM_STRENGTH: f32 = 1.0;
pub const MAX_LEAF_JITTER: f32 = 2.0;

/// Slack for bounds given in degrees and converted to radians
const BOUND_EPSILON: f32 = 1e-5;

/// Parameters driving the turtle. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleParams {
    /// Turn angle for yaw/pitch/roll symbols
    pub angle: f32,
    /// Step length of the first move
    pub initial_length: f32,
    /// Radius at the base of the trunk
    pub initial_radius: f32,
    /// Length multiplier applied after every move
    pub length_decay: f32,
    /// Radius multiplier applied after every move and on every branch
    pub radius_decay: f32,
    /// Maximum random deviation added to every rotation
    pub rotation_jitter: f32,
    /// Maximum fractional deviation of each step length
    pub length_jitter: f32,
    /// Maximum random yaw on yaw symbols and new branches
    pub branch_spread: f32,
    /// Roll new branches by a random angle around their parent
    pub branch_roll: bool,
    /// How hard the heading bends toward `tropism_direction`
    pub tropism_strength: f32,
    pub tropism_direction: Vec3,
    /// Maximum per-axis offset of leaf markers
    pub leaf_jitter: f32,
}

impl Default for TurtleParams {
    fn default() -> Self {
        Self {
            angle: 20f32.to_radians(),
            initial_length: 1.0,
            initial_radius: 1.0,
            length_decay: 0.88,
            radius_decay: 0.9,
            rotation_jitter: 5f32.to_radians(),
            length_jitter: 0.1,
            branch_spread: 30f32.to_radians(),
            branch_roll: true,
            tropism_strength: 0.05,
            tropism_direction: Vec3::UP,
            leaf_jitter: 0.1,
        }
    }
}

impl TurtleParams {
    /// Deterministic planar turtle: no jitter, spread, roll or tropism
    pub fn rigid(angle: f32) -> Self {
        Self {
            angle,
            length_decay: 1.0,
            radius_decay: 1.0,
            rotation_jitter: 0.0,
            length_jitter: 0.0,
            branch_spread: 0.0,
            branch_roll: false,
            tropism_strength: 0.0,
            leaf_jitter: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        finite("angle", self.angle)?;
        positive("initial_length", self.initial_length)?;
        positive("initial_radius", self.initial_radius)?;
        unit_decay("length_decay", self.length_decay)?;
        unit_decay("radius_decay", self.radius_decay)?;
        bounded("rotation_jitter", self.rotation_jitter, MAX_ROTATION_JITTER)?;
        non_negative("length_jitter", self.length_jitter)?;
        if self.length_jitter >= 1.0 {
            return Err(TreeError::invalid(
                "length_jitter",
                format!("{} would allow zero or negative steps", self.length_jitter),
            ));
        }
        bounded("branch_spread", self.branch_spread, MAX_BRANCH_SPREAD)?;
        bounded("tropism_strength", self.tropism_strength, MAX_TROPISM_STRENGTH)?;
        if !self.tropism_direction.is_finite() || self.tropism_direction.length() < 1e-6 {
            return Err(TreeError::invalid(
                "tropism_direction",
                "must be a finite, non-zero vector",
            ));
        }
        bounded("leaf_jitter", self.leaf_jitter, MAX_LEAF_JITTER)
    }
}

pub(crate) fn finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TreeError::invalid(name, format!("{} is not finite", value)))
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TreeError::invalid(name, format!("{} must be greater than zero", value)))
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TreeError::invalid(name, format!("{} must not be negative", value)))
    }
}

/// Finite and within `[0, max]`
pub(crate) fn bounded(name: &'static str, value: f32, max: f32) -> Result<()> {
    non_negative(name, value)?;
    if value <= max + BOUND_EPSILON {
        Ok(())
    } else {
        Err(TreeError::invalid(name, format!("{} exceeds maximum of {}", value, max)))
    }
}

pub(crate) fn unit_decay(name: &'static str, value: f32) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TreeError::invalid(name, format!("{} is outside (0, 1]", value)))
    }
}

/// Pose and growth state of the turtle at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub position: Vec3,
    pub orientation: Mat3,
    /// Length of the next forward step before jitter
    pub length: f32,
    /// Radius at the start of the next segment
    pub radius: f32,
}

impl TurtleState {
    pub fn initial(params: &TurtleParams) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Mat3::identity(),
            length: params.initial_length,
            radius: params.initial_radius,
        }
    }
}

/// One recorded move-forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub start_radius: f32,
    pub end_radius: f32,
    /// Branch stack depth when the segment was drawn
    pub depth: usize,
}

impl BranchSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }
}

/// Leaf placement recorded when a branch closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafMarker {
    pub position: Vec3,
    pub orientation: Mat3,
    pub jitter: Vec3,
    /// Branch stack depth after the pop
    pub depth: usize,
}

impl LeafMarker {
    pub fn jittered_position(&self) -> Vec3 {
        self.position + self.jitter
    }
}

use std::f32::consts::PI;

use super::state::{BranchSegment, LeafMarker, TurtleParams, TurtleState};
use crate::error::{Result, TreeError};
use crate::grammar::{Symbol, SymbolString};
use crate::math::Vec3;
use crate::variation::RandomSource;

/// Non-fatal problems found while walking the symbol string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackWarning {
    /// A `]` arrived with an empty stack and was ignored
    UnmatchedPop { index: usize },
    /// The string ended with branches still open
    UnclosedBranches { depth: usize },
}

/// Geometric trace of one interpretation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpretation {
    pub segments: Vec<BranchSegment>,
    pub leaves: Vec<LeafMarker>,
    pub warnings: Vec<StackWarning>,
}

impl Interpretation {
    pub fn is_balanced(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Escalate stack warnings to a hard error
    pub fn ensure_balanced(&self) -> Result<()> {
        let mut unmatched_pops = 0;
        let mut unclosed_pushes = 0;
        for warning in &self.warnings {
            match *warning {
                StackWarning::UnmatchedPop { .. } => unmatched_pops += 1,
                StackWarning::UnclosedBranches { depth } => unclosed_pushes += depth,
            }
        }

        if unmatched_pops == 0 && unclosed_pushes == 0 {
            Ok(())
        } else {
            Err(TreeError::ImbalancedStack {
                unmatched_pops,
                unclosed_pushes,
            })
        }
    }

    pub fn max_depth(&self) -> usize {
        self.segments.iter().map(|s| s.depth).max().unwrap_or(0)
    }
}

/// Walk `symbols` with a 3D turtle and record segments and leaves.
///
/// All randomness is drawn from `rng`, in symbol order, so the same seed and
/// parameters always give the same trace.
pub fn interpret<R: RandomSource + ?Sized>(
    symbols: &SymbolString,
    params: &TurtleParams,
    rng: &mut R,
) -> Result<Interpretation> {
    params.validate()?;

    let mut turtle = Turtle::new(params, rng);
    for (index, &symbol) in symbols.iter().enumerate() {
        turtle.step(index, symbol);
    }
    let trace = turtle.finish();

    tracing::debug!(
        symbols = symbols.len(),
        segments = trace.segments.len(),
        leaves = trace.leaves.len(),
        warnings = trace.warnings.len(),
        "interpreted symbol string"
    );

    Ok(trace)
}

struct Turtle<'a, R: RandomSource + ?Sized> {
    params: &'a TurtleParams,
    rng: &'a mut R,
    state: TurtleState,
    stack: Vec<TurtleState>,
    trace: Interpretation,
}

impl<'a, R: RandomSource + ?Sized> Turtle<'a, R> {
    fn new(params: &'a TurtleParams, rng: &'a mut R) -> Self {
        Self {
            params,
            rng,
            state: TurtleState::initial(params),
            stack: Vec::new(),
            trace: Interpretation::default(),
        }
    }

    fn step(&mut self, index: usize, symbol: Symbol) {
        let angle = self.params.angle;
        match symbol {
            Symbol::Forward => self.forward(true),
            Symbol::Skip => self.forward(false),
            Symbol::TurnLeft => self.yaw(angle),
            Symbol::TurnRight => self.yaw(-angle),
            Symbol::PitchDown => self.rotate_local(angle, Vec3::X),
            Symbol::PitchUp => self.rotate_local(-angle, Vec3::X),
            Symbol::RollLeft => self.rotate_local(angle, Vec3::Z),
            Symbol::RollRight => self.rotate_local(-angle, Vec3::Z),
            Symbol::TurnAround => self.rotate_local(PI, Vec3::Y),
            Symbol::Push => self.push(),
            Symbol::Pop => self.pop(index),
            Symbol::Variable(_) => {}
        }
    }

    /// Rotate about a local axis; jitter is added first, tropism follows
    fn rotate_local(&mut self, angle: f32, local_axis: Vec3) {
        let total = angle + self.rng.rotation_jitter(self.params.rotation_jitter);
        self.state.orientation = self.state.orientation.rotated_local(local_axis, total);
        self.apply_tropism();
    }

    fn yaw(&mut self, angle: f32) {
        let spread = self.rng.branch_spread(self.params.branch_spread);
        self.rotate_local(spread, Vec3::Y);
        self.rotate_local(angle, Vec3::Y);
    }

    /// Bend the heading toward the tropism direction without overshooting it
    fn apply_tropism(&mut self) {
        let strength = self.params.tropism_strength;
        if strength <= 0.0 {
            return;
        }

        let direction = self.params.tropism_direction.normalize();
        let forward = self.state.orientation.forward();
        let axis = forward.cross(&direction);
        if axis.length() <= 1e-4 {
            return;
        }

        let bend = (strength * self.state.length * 0.1).min(forward.angle_to(&direction));
        self.state.orientation = self.state.orientation.rotated_world(axis, bend);
    }

    fn forward(&mut self, draw: bool) {
        let step = self.state.length * self.rng.length_factor(self.params.length_jitter);
        self.apply_tropism();

        let start = self.state.position;
        let start_radius = self.state.radius;
        self.state.position += self.state.orientation.forward().scale(step);

        self.state.length *= self.params.length_decay;
        self.state.radius *= self.params.radius_decay;

        if draw {
            self.trace.segments.push(BranchSegment {
                start,
                end: self.state.position,
                start_radius,
                end_radius: self.state.radius,
                depth: self.stack.len(),
            });
        }
    }

    fn push(&mut self) {
        self.stack.push(self.state);
        self.state.radius *= self.params.radius_decay;

        let spread = self.rng.branch_spread(self.params.branch_spread);
        self.rotate_local(spread, Vec3::Y);
        if self.params.branch_roll {
            let roll = self.rng.branch_roll();
            self.rotate_local(roll, Vec3::Z);
        }
    }

    fn pop(&mut self, index: usize) {
        let Some(saved) = self.stack.pop() else {
            tracing::warn!(index, "pop with empty branch stack ignored");
            self.trace.warnings.push(StackWarning::UnmatchedPop { index });
            return;
        };

        self.state = saved;
        let jitter = self.rng.leaf_offset(self.params.leaf_jitter);
        self.trace.leaves.push(LeafMarker {
            position: self.state.position,
            orientation: self.state.orientation,
            jitter,
            depth: self.stack.len(),
        });
    }

    fn finish(mut self) -> Interpretation {
        if !self.stack.is_empty() {
            let depth = self.stack.len();
            tracing::warn!(depth, "symbol string ended with unclosed branches");
            self.trace.warnings.push(StackWarning::UnclosedBranches { depth });
        }
        self.trace
    }
}

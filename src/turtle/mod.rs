//! Turtle interpreter: walks an expanded symbol string in 3D and records
//! branch segments and leaf markers.

pub mod state;
pub mod interpreter;

pub use state::{BranchSegment, LeafMarker, TurtleParams, TurtleState};
pub use interpreter::{interpret, Interpretation, StackWarning};

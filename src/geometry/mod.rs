//! Geometry assembly: branch curves with automatic handles, leaf
//! instances, and optional triangle meshes for hosts without a curve
//! renderer.

pub mod mesh;
pub mod curve;
pub mod leaf;
pub mod assembler;

pub use mesh::{Mesh, Vertex};
pub use curve::{BranchCurve, CurvePoint, CURVE_RESOLUTION, RADIAL_SEGMENTS};
pub use leaf::{leaf_template_mesh, LeafInstance};
pub use assembler::{assemble, AssemblyParams, TreeGeometry};

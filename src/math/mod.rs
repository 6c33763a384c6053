pub mod vec3;
pub mod frame;
pub mod matrix;
pub mod spline;

pub use vec3::Vec3;
pub use frame::Mat3;
pub use matrix::Mat4;
pub use spline::{auto_handles, evaluate_bezier, Handles};

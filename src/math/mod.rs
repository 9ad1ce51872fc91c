//! Math utilities module
//!
//! Provides convenient re-exports from glam and the rigid transform used to
//! compose the arm's joint frames.

mod transform;

pub use transform::Transform;

// Re-export commonly used glam types
pub use glam::{DMat4, DQuat, DVec3};

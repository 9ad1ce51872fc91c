//! # arm-ik
//!
//! Closed-form inverse kinematics for a robotic arm made of a yaw-only base
//! carrying two rigid links.
//!
//! ## Features
//! - Analytic solver with reachability test and a rest-pose fallback
//! - Forward kinematics for the base, shoulder, elbow and tip frames
//! - Per-joint range constraints for manually driven poses
//! - A frame-driven controller with cancellable deferred solves
//!
//! ## Conventions
//! Z is the base axis. `base_yaw = atan2(y, x)` turns the arm's vertical work
//! plane onto the target. Pitch angles are measured from the horizontal and
//! the elbow is relative to the first link.
//!
//! ## Example
//! ```rust
//! use arm_ik::ik::{AnalyticSolver, ArmChain};
//! use glam::DVec3;
//!
//! let chain = ArmChain::builder()
//!     .links(5.0, 5.0)
//!     .build()
//!     .expect("link lengths are positive");
//!
//! let target = DVec3::new(0.0, 4.0, 4.0);
//! let angles = AnalyticSolver::solve(&chain, target).expect("target within reach");
//! assert!((chain.end_effector(&angles) - target).length() < 1e-9);
//! ```

pub mod controller;
pub mod error;
pub mod ik;
pub mod math;

pub use controller::{ArmController, Gripper, Scheduler, TimerHandle, UnreachablePolicy};
pub use error::IkError;
pub use ik::constraint::{Constraint, JointLimits, RangeConstraint};
pub use ik::{
    solve, AnalyticSolver, ArmChain, ArmPose, ChainBuilder, ElbowBranch, Joint, JointAngles,
    LinkLengths, SolveResult,
};
pub use math::Transform;

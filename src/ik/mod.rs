//! Inverse Kinematics module
//!
//! This module contains the arm model, joint types and the closed-form
//! two-link solver.

pub mod chain;
pub mod constraint;
pub mod joint;
pub mod solver;

pub use chain::{ArmChain, ArmPose, ChainBuilder, ElbowBranch, LinkLengths};
pub use constraint::{Constraint, JointLimits, NoConstraint, RangeConstraint};
pub use joint::{Joint, JointAngles};
pub use solver::{solve, AnalyticSolver, SolveResult};

use super::joint::{Joint, JointAngles};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Debug;

pub trait Constraint: Send + Sync + Debug {
    fn apply(&self, angle: f64) -> f64;
    fn clone_box(&self) -> Box<dyn Constraint>;
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Keeps a joint angle inside `[min, max]` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeConstraint {
    pub min: f64,
    pub max: f64,
}

impl RangeConstraint {
    pub fn new(min_degrees: f64, max_degrees: f64) -> Self {
        Self::from_radians(min_degrees.to_radians(), max_degrees.to_radians())
    }

    pub fn from_radians(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn symmetric(half_range: f64) -> Self {
        Self::from_radians(-half_range.abs(), half_range.abs())
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.min..=self.max).contains(&angle)
    }
}

impl Constraint for RangeConstraint {
    fn apply(&self, angle: f64) -> f64 {
        if angle.is_nan() {
            return self.min.max(0.0).min(self.max);
        }
        angle.clamp(self.min, self.max)
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoConstraint;

impl Constraint for NoConstraint {
    fn apply(&self, angle: f64) -> f64 {
        angle
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}

/// One constraint per joint, applied to manually written angles.
#[derive(Debug, Clone)]
pub struct JointLimits {
    constraints: [Box<dyn Constraint>; 3],
}

impl JointLimits {
    pub fn unconstrained() -> Self {
        Self {
            constraints: [Box::new(NoConstraint), Box::new(NoConstraint), Box::new(NoConstraint)],
        }
    }

    pub fn with_constraint<C: Constraint + 'static>(mut self, joint: Joint, constraint: C) -> Self {
        self.set_constraint(joint, constraint);
        self
    }

    pub fn set_constraint<C: Constraint + 'static>(&mut self, joint: Joint, constraint: C) {
        self.constraints[joint.index()] = Box::new(constraint);
    }

    pub fn clear_constraint(&mut self, joint: Joint) {
        self.constraints[joint.index()] = Box::new(NoConstraint);
    }

    pub fn apply(&self, joint: Joint, angle: f64) -> f64 {
        self.constraints[joint.index()].apply(angle)
    }

    pub fn apply_all(&self, angles: JointAngles) -> JointAngles {
        let mut out = angles;
        for joint in Joint::ALL {
            out.set(joint, self.apply(joint, angles.get(joint)));
        }
        out
    }
}

impl Default for JointLimits {
    /// Slider ranges of the manual control panel.
    fn default() -> Self {
        Self::unconstrained()
            .with_constraint(Joint::Base, RangeConstraint::symmetric(PI))
            .with_constraint(Joint::Shoulder, RangeConstraint::symmetric(FRAC_PI_2))
            .with_constraint(Joint::Elbow, RangeConstraint::symmetric(FRAC_PI_2))
    }
}

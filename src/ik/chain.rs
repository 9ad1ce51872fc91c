use super::joint::JointAngles;
use crate::error::IkError;
use crate::math::Transform;
use glam::DVec3;

/// Lengths of the two rigid segments, shoulder to elbow then elbow to tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLengths {
    l1: f64,
    l2: f64,
}

impl LinkLengths {
    pub fn new(l1: f64, l2: f64) -> Result<Self, IkError> {
        for (link, value) in [(1, l1), (2, l2)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(IkError::InvalidLinkLength { link, value });
            }
        }
        Ok(Self { l1, l2 })
    }

    pub fn l1(&self) -> f64 {
        self.l1
    }

    pub fn l2(&self) -> f64 {
        self.l2
    }
}

impl Default for LinkLengths {
    fn default() -> Self {
        Self { l1: 1.0, l2: 1.0 }
    }
}

/// Which of the two mirror solutions the solver returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElbowBranch {
    /// `elbow_pitch = +acos(D)`, in `[0, pi]`.
    #[default]
    Up,
    /// `elbow_pitch = -acos(D)`, in `[-pi, 0]`.
    Down,
}

impl ElbowBranch {
    pub fn sign(self) -> f64 {
        match self {
            ElbowBranch::Up => 1.0,
            ElbowBranch::Down => -1.0,
        }
    }
}

/// A yaw base carrying a two-link planar arm. Z is the base axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmChain {
    pub(crate) links: LinkLengths,
    pub(crate) reach_tolerance: f64,
    pub(crate) elbow_branch: ElbowBranch,
}

impl ArmChain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    pub fn new(links: LinkLengths) -> Self {
        Self {
            links,
            reach_tolerance: DEFAULT_REACH_TOLERANCE,
            elbow_branch: ElbowBranch::default(),
        }
    }

    pub fn links(&self) -> LinkLengths {
        self.links
    }

    pub fn reach_tolerance(&self) -> f64 {
        self.reach_tolerance
    }

    pub fn elbow_branch(&self) -> ElbowBranch {
        self.elbow_branch
    }

    pub fn total_length(&self) -> f64 {
        self.links.l1 + self.links.l2
    }

    pub fn max_reach(&self) -> f64 {
        self.total_length()
    }

    pub fn min_reach(&self) -> f64 {
        (self.links.l1 - self.links.l2).abs()
    }

    /// Cosine of the elbow angle from the law of cosines, unclamped.
    ///
    /// Lengths are normalised by the longer link first so the squares stay
    /// in range for very large or very small arms.
    pub fn elbow_cosine(&self, target: DVec3) -> f64 {
        let LinkLengths { l1, l2 } = self.links;
        let scale = l1.max(l2);
        let (a, b) = (l1 / scale, l2 / scale);
        ((target / scale).length_squared() - a * a - b * b) / (2.0 * a * b)
    }

    /// Distance from the shoulder to `target`, without overflowing the
    /// intermediate squares.
    pub fn distance_to(&self, target: DVec3) -> f64 {
        target.x.hypot(target.y).hypot(target.z)
    }

    pub fn is_reachable(&self, target: DVec3) -> bool {
        if !target.is_finite() {
            return false;
        }
        let d = self.elbow_cosine(target);
        (-1.0 - self.reach_tolerance..=1.0 + self.reach_tolerance).contains(&d)
    }

    pub fn forward_kinematics(&self, angles: &JointAngles) -> ArmPose {
        let base = Transform::yaw(angles.base_yaw);
        let shoulder = base.then(&Transform::pitch(angles.shoulder_pitch));
        let elbow = shoulder
            .then(&Transform::from_position(DVec3::X * self.links.l1))
            .then(&Transform::pitch(angles.elbow_pitch));
        let tip = elbow.then(&Transform::from_position(DVec3::X * self.links.l2));

        ArmPose {
            base,
            shoulder,
            elbow,
            tip,
        }
    }

    pub fn end_effector(&self, angles: &JointAngles) -> DVec3 {
        self.forward_kinematics(angles).tip.position
    }
}

impl Default for ArmChain {
    fn default() -> Self {
        Self::new(LinkLengths::default())
    }
}

pub const DEFAULT_REACH_TOLERANCE: f64 = 1e-9;

/// World frames of every joint for one set of angles.
///
/// Each frame's forward axis points along the segment it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub base: Transform,
    pub shoulder: Transform,
    pub elbow: Transform,
    pub tip: Transform,
}

impl ArmPose {
    pub fn end_effector(&self) -> DVec3 {
        self.tip.position
    }

    pub fn elbow_position(&self) -> DVec3 {
        self.elbow.position
    }

    /// Shoulder, elbow and tip positions in chain order.
    pub fn positions(&self) -> impl Iterator<Item = DVec3> {
        [self.shoulder.position, self.elbow.position, self.tip.position].into_iter()
    }
}

pub struct ChainBuilder {
    l1: f64,
    l2: f64,
    reach_tolerance: f64,
    elbow_branch: ElbowBranch,
}

impl ChainBuilder {
    pub fn new() -> Self {
        let links = LinkLengths::default();
        Self {
            l1: links.l1,
            l2: links.l2,
            reach_tolerance: DEFAULT_REACH_TOLERANCE,
            elbow_branch: ElbowBranch::default(),
        }
    }

    pub fn upper_link(mut self, length: f64) -> Self {
        self.l1 = length;
        self
    }

    pub fn lower_link(mut self, length: f64) -> Self {
        self.l2 = length;
        self
    }

    pub fn links(self, l1: f64, l2: f64) -> Self {
        self.upper_link(l1).lower_link(l2)
    }

    pub fn reach_tolerance(mut self, tolerance: f64) -> Self {
        self.reach_tolerance = tolerance.abs();
        self
    }

    pub fn elbow_branch(mut self, branch: ElbowBranch) -> Self {
        self.elbow_branch = branch;
        self
    }

    pub fn build(self) -> Result<ArmChain, IkError> {
        if !self.reach_tolerance.is_finite() {
            return Err(IkError::InvalidReachTolerance {
                value: self.reach_tolerance,
            });
        }
        Ok(ArmChain {
            links: LinkLengths::new(self.l1, self.l2)?,
            reach_tolerance: self.reach_tolerance,
            elbow_branch: self.elbow_branch,
        })
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn chain(l1: f64, l2: f64) -> ArmChain {
        ArmChain::builder().links(l1, l2).build().unwrap()
    }

    fn assert_vec_eq(a: DVec3, b: DVec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_link_lengths() {
        assert_eq!(
            LinkLengths::new(0.0, 1.0),
            Err(IkError::InvalidLinkLength { link: 1, value: 0.0 })
        );
        assert_eq!(
            LinkLengths::new(1.0, -2.0),
            Err(IkError::InvalidLinkLength { link: 2, value: -2.0 })
        );
        assert!(ArmChain::builder().upper_link(f64::NAN).build().is_err());
        assert!(ArmChain::builder().lower_link(f64::INFINITY).build().is_err());
    }

    #[test]
    fn rejects_non_finite_tolerance() {
        let nan = ArmChain::builder().reach_tolerance(f64::NAN).build();
        assert!(matches!(nan, Err(IkError::InvalidReachTolerance { .. })));
        assert!(ArmChain::builder()
            .reach_tolerance(f64::INFINITY)
            .build()
            .is_err());
        assert_eq!(
            ArmChain::builder().reach_tolerance(-1e-6).build().unwrap().reach_tolerance(),
            1e-6
        );
    }

    #[test]
    fn extreme_link_lengths_keep_their_workspace() {
        let huge = chain(1e200, 1e200);
        assert!(huge.is_reachable(DVec3::new(1e200, 0.0, 0.0)));
        assert!(huge.is_reachable(DVec3::new(0.0, 0.0, 2e200)));
        assert!(!huge.is_reachable(DVec3::new(0.0, 0.0, 2.1e200)));
        assert_relative_eq!(
            huge.distance_to(DVec3::new(3e200, 4e200, 0.0)),
            5e200,
            max_relative = 1e-15
        );

        let tiny = chain(1e-200, 1e-200);
        assert!(tiny.is_reachable(DVec3::ZERO));
        assert!(tiny.is_reachable(DVec3::new(1e-200, 1e-200, 0.0)));
        assert!(!tiny.is_reachable(DVec3::new(3e-200, 0.0, 0.0)));

        let uneven = chain(2e-200, 1e-200);
        assert!(!uneven.is_reachable(DVec3::ZERO));
        assert!(uneven.is_reachable(DVec3::new(0.0, 2e-200, 0.0)));
    }

    #[test]
    fn builder_defaults() {
        let c = ArmChain::builder().build().unwrap();
        assert_eq!(c, ArmChain::default());
        assert_eq!(c.links().l1(), 1.0);
        assert_eq!(c.reach_tolerance(), DEFAULT_REACH_TOLERANCE);
        assert_eq!(c.elbow_branch(), ElbowBranch::Up);
    }

    #[test]
    fn workspace_bounds() {
        let c = chain(3.0, 5.0);
        assert_eq!(c.max_reach(), 8.0);
        assert_eq!(c.min_reach(), 2.0);
        assert!(c.is_reachable(DVec3::new(0.0, 0.0, 8.0)));
        assert!(c.is_reachable(DVec3::new(2.0, 0.0, 0.0)));
        assert!(c.is_reachable(DVec3::new(3.0, 3.0, 0.0)));
        assert!(!c.is_reachable(DVec3::new(1.0, 0.0, 0.0)));
        assert!(!c.is_reachable(DVec3::new(8.1, 0.0, 0.0)));
        assert!(!c.is_reachable(DVec3::new(f64::NAN, 0.0, 0.0)));
    }

    #[test]
    fn fk_rest_pose_is_straight_along_x() {
        let c = chain(2.0, 3.0);
        let pose = c.forward_kinematics(&JointAngles::ZERO);
        let points: Vec<DVec3> = pose.positions().collect();
        assert_vec_eq(points[0], DVec3::ZERO);
        assert_vec_eq(points[1], DVec3::new(2.0, 0.0, 0.0));
        assert_vec_eq(points[2], DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn fk_matches_planar_formula() {
        let c = chain(2.0, 1.5);
        let (yaw, s, e): (f64, f64, f64) = (0.7, 0.4, -1.1);
        let r = 2.0 * s.cos() + 1.5 * (s + e).cos();
        let h = 2.0 * s.sin() + 1.5 * (s + e).sin();
        let expected = DVec3::new(r * yaw.cos(), r * yaw.sin(), h);
        assert_vec_eq(c.end_effector(&JointAngles::new(yaw, s, e)), expected);
    }

    #[test]
    fn fk_frames_follow_segments() {
        let c = chain(1.0, 1.0);
        let pose = c.forward_kinematics(&JointAngles::new(FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2));
        assert_vec_eq(pose.elbow_position(), DVec3::new(0.0, 0.0, 1.0));
        assert_vec_eq(pose.end_effector(), DVec3::new(0.0, 1.0, 1.0));
        assert_vec_eq(pose.elbow.forward(), DVec3::Y);
    }

    #[test]
    fn fully_folded_tip_returns_to_shoulder() {
        let c = chain(1.0, 1.0);
        let tip = c.end_effector(&JointAngles::new(0.3, 0.2, PI));
        assert_vec_eq(tip, DVec3::ZERO);
    }
}

//! Driving component for an arm in an animation loop.
//!
//! [`ArmController`] owns the current target, the displayed pose and any
//! deferred solves. The caller advances it once per frame with
//! [`ArmController::update`] and reads [`ArmController::pose`] or
//! [`ArmController::frames`] to draw.

mod gripper;
mod schedule;

pub use gripper::{Gripper, FINGER_OFFSET_CLOSED, FINGER_OFFSET_OPEN};
pub use schedule::{Scheduler, TimerHandle};

use crate::ik::{AnalyticSolver, ArmChain, ArmPose, Joint, JointAngles, JointLimits, SolveResult};
use glam::DVec3;
use std::time::Duration;

/// What the controller does with its pose when a solve misses the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreachablePolicy {
    /// Apply the solver's rest-pose fallback.
    #[default]
    Reset,
    /// Keep whatever pose was shown before the solve.
    HoldLastPose,
}

#[derive(Debug, Clone)]
pub struct ArmController {
    chain: ArmChain,
    target: DVec3,
    pose: JointAngles,
    limits: JointLimits,
    policy: UnreachablePolicy,
    gripper: Gripper,
    scheduler: Scheduler,
    last_result: Option<SolveResult>,
}

impl ArmController {
    pub fn new(chain: ArmChain) -> Self {
        Self {
            chain,
            target: DVec3::ZERO,
            pose: JointAngles::ZERO,
            limits: JointLimits::default(),
            policy: UnreachablePolicy::default(),
            gripper: Gripper::default(),
            scheduler: Scheduler::new(),
            last_result: None,
        }
    }

    pub fn with_policy(mut self, policy: UnreachablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_limits(mut self, limits: JointLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_target(mut self, target: DVec3) -> Self {
        self.target = target;
        self
    }

    pub fn chain(&self) -> &ArmChain {
        &self.chain
    }

    pub fn policy(&self) -> UnreachablePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: UnreachablePolicy) {
        self.policy = policy;
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Replaces the target. The pose is untouched until the next solve.
    pub fn set_target(&mut self, target: DVec3) {
        self.target = target;
    }

    pub fn pose(&self) -> JointAngles {
        self.pose
    }

    pub fn frames(&self) -> ArmPose {
        self.chain.forward_kinematics(&self.pose)
    }

    pub fn last_result(&self) -> Option<SolveResult> {
        self.last_result
    }

    /// Solves for the current target and applies the result to the pose.
    pub fn solve(&mut self) -> SolveResult {
        let result = AnalyticSolver::solve_with_fallback(&self.chain, self.target);

        if result.reachable {
            self.pose = result.angles;
        } else {
            match self.policy {
                UnreachablePolicy::Reset => {
                    log::info!("Target {} unreachable, resetting pose", self.target);
                    self.pose = result.angles;
                }
                UnreachablePolicy::HoldLastPose => {
                    log::info!("Target {} unreachable, holding pose {}", self.target, self.pose);
                }
            }
        }

        self.last_result = Some(result);
        result
    }

    /// Solves once after `delay` of controller time has passed.
    pub fn schedule_solve(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.scheduler.schedule(delay);
        log::debug!("Scheduled solve {handle:?} in {delay:?}");
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.scheduler.cancel(handle);
        if cancelled {
            log::debug!("Cancelled solve {handle:?}");
        }
        cancelled
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.scheduler.is_pending(handle)
    }

    pub fn pending_solves(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Controller time elapsed through [`ArmController::update`].
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    /// Advances controller time by `dt`, running every solve that came due.
    ///
    /// Returns the result of the last solve run, if any.
    pub fn update(&mut self, dt: Duration) -> Option<SolveResult> {
        let mut last = None;
        for handle in self.scheduler.advance(dt) {
            log::debug!("Running scheduled solve {handle:?}");
            last = Some(self.solve());
        }
        last
    }

    /// Writes one joint directly, bypassing the solver. The angle is clamped
    /// to the joint's limits and the clamped value is returned.
    pub fn set_joint(&mut self, joint: Joint, angle: f64) -> f64 {
        let angle = self.limits.apply(joint, angle);
        self.pose.set(joint, angle);
        angle
    }

    pub fn set_pose(&mut self, angles: JointAngles) -> JointAngles {
        self.pose = self.limits.apply_all(angles);
        self.pose
    }

    pub fn gripper(&self) -> Gripper {
        self.gripper
    }

    pub fn gripper_open(&self) -> bool {
        self.gripper.is_open()
    }

    pub fn set_gripper_open(&mut self, open: bool) {
        self.gripper.set_open(open);
    }

    pub fn toggle_gripper(&mut self) -> bool {
        self.gripper.toggle()
    }
}

impl Default for ArmController {
    fn default() -> Self {
        Self::new(ArmChain::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn reachable_pose(controller: &mut ArmController) -> JointAngles {
        controller.set_target(DVec3::new(1.0, 0.5, 0.5));
        assert!(controller.solve().reachable);
        controller.pose()
    }

    #[test]
    fn set_target_does_not_solve() {
        let mut c = ArmController::default();
        c.set_target(DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.target(), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.pose(), JointAngles::ZERO);
        assert!(c.last_result().is_none());
    }

    #[test]
    fn solve_moves_tip_onto_target() {
        let mut c = ArmController::default();
        let target = DVec3::new(0.3, -0.8, 0.9);
        c.set_target(target);
        let result = c.solve();
        assert!(result.reachable);
        assert_eq!(c.last_result(), Some(result));
        let tip = c.frames().end_effector();
        assert!((tip - target).length() < 1e-9);
    }

    #[test]
    fn reset_policy_applies_fallback() {
        let mut c = ArmController::default();
        reachable_pose(&mut c);
        c.set_target(DVec3::new(5.0, 0.0, 0.0));
        assert!(!c.solve().reachable);
        assert_eq!(c.pose(), JointAngles::ZERO);
    }

    #[test]
    fn hold_policy_keeps_previous_pose() {
        let mut c = ArmController::default().with_policy(UnreachablePolicy::HoldLastPose);
        let held = reachable_pose(&mut c);
        c.set_target(DVec3::new(5.0, 0.0, 0.0));
        let result = c.solve();
        assert!(!result.reachable);
        assert_eq!(result.angles, JointAngles::ZERO);
        assert_eq!(c.pose(), held);
    }

    #[test]
    fn scheduled_solve_fires_after_delay() {
        let mut c = ArmController::default().with_target(DVec3::new(1.0, 0.0, 0.0));
        let handle = c.schedule_solve(Duration::from_secs(5));
        assert!(c.update(Duration::from_millis(4990)).is_none());
        assert_eq!(c.pose(), JointAngles::ZERO);

        let result = c.update(Duration::from_millis(10)).unwrap();
        assert!(result.reachable);
        assert!(!c.is_pending(handle));
        assert_abs_diff_eq!(c.pose().elbow_pitch, 2.0 * PI / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.pose().shoulder_pitch, -PI / 3.0, epsilon = 1e-12);
        assert_eq!(c.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn scheduled_solve_uses_target_at_fire_time() {
        let mut c = ArmController::default();
        c.schedule_solve(Duration::from_millis(100));
        c.set_target(DVec3::new(0.0, 0.0, 2.0));
        let result = c.update(Duration::from_millis(100)).unwrap();
        assert!(result.reachable);
        assert_abs_diff_eq!(c.pose().shoulder_pitch, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn cancelled_solve_never_runs() {
        let mut c = ArmController::default().with_target(DVec3::new(1.0, 0.0, 0.0));
        let handle = c.schedule_solve(Duration::from_millis(100));
        assert_eq!(c.pending_solves(), 1);
        assert!(c.cancel(handle));
        assert!(!c.cancel(handle));
        assert!(c.update(Duration::from_secs(1)).is_none());
        assert!(c.last_result().is_none());
    }

    #[test]
    fn oversized_delays_do_not_panic() {
        let mut c = ArmController::default().with_target(DVec3::new(1.0, 0.0, 0.0));
        c.update(Duration::from_millis(1));
        let handle = c.schedule_solve(Duration::MAX);
        assert!(c.update(Duration::from_secs(60)).is_none());
        assert!(c.is_pending(handle));
        assert!(c.update(Duration::MAX).unwrap().reachable);
        assert!(c.update(Duration::MAX).is_none());
        assert_eq!(c.elapsed(), Duration::MAX);
    }

    #[test]
    fn manual_joints_are_clamped_to_limits() {
        let mut c = ArmController::default();
        assert_eq!(c.set_joint(Joint::Shoulder, 3.0), FRAC_PI_2);
        assert_eq!(c.set_joint(Joint::Base, 1.0), 1.0);
        assert_eq!(c.pose(), JointAngles::new(1.0, FRAC_PI_2, 0.0));

        let pose = c.set_pose(JointAngles::new(0.0, 0.0, -2.0));
        assert_eq!(pose.elbow_pitch, -FRAC_PI_2);
    }

    #[test]
    fn solver_output_is_not_clamped() {
        let mut c = ArmController::default();
        c.set_target(DVec3::new(0.1, 0.0, 0.0));
        assert!(c.solve().reachable);
        assert!(c.pose().elbow_pitch > FRAC_PI_2);
    }

    #[test]
    fn gripper_is_independent_of_pose() {
        let mut c = ArmController::default();
        let before = c.pose();
        assert!(c.toggle_gripper());
        assert!(c.gripper_open());
        c.set_gripper_open(false);
        assert!(!c.gripper().is_open());
        assert_eq!(c.pose(), before);
    }
}

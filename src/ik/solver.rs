//! Closed-form solver for the yaw-base two-link arm.
//!
//! The target is first turned into the arm's vertical work plane by the base
//! yaw, which leaves a planar two-link problem in radial distance `r` and
//! height `h`. The elbow comes from the law of cosines and the shoulder from
//! the `atan2` form, which stays well conditioned near the workspace boundary.

use super::chain::{ArmChain, LinkLengths};
use super::joint::JointAngles;
use crate::error::IkError;
use glam::DVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    /// Solved angles, or [`JointAngles::ZERO`] when the target is out of reach.
    pub angles: JointAngles,
    pub reachable: bool,
    /// Distance from the shoulder to the target.
    pub distance: f64,
}

pub struct AnalyticSolver;

impl AnalyticSolver {
    pub fn solve(chain: &ArmChain, target: DVec3) -> Result<JointAngles, IkError> {
        let distance = chain.distance_to(target);

        if !chain.is_reachable(target) {
            return Err(IkError::TargetUnreachable {
                distance,
                min_reach: chain.min_reach(),
                max_reach: chain.max_reach(),
            });
        }

        let (l1, l2) = (chain.links.l1(), chain.links.l2());

        // atan2(0, 0) is 0, so a target on the base axis keeps the rest yaw.
        let base_yaw = target.y.atan2(target.x);
        let r = target.x.hypot(target.y);
        let h = target.z;

        let cos_elbow = chain.elbow_cosine(target).clamp(-1.0, 1.0);
        let elbow_pitch = chain.elbow_branch.sign() * cos_elbow.acos();

        let shoulder_pitch =
            h.atan2(r) - (l2 * elbow_pitch.sin()).atan2(l1 + l2 * elbow_pitch.cos());

        let angles = JointAngles {
            base_yaw,
            shoulder_pitch,
            elbow_pitch,
        };

        log::debug!("Solved target {target} at distance {distance:.4}: {angles}");

        Ok(angles)
    }

    /// Like [`AnalyticSolver::solve`], but never fails: unreachable targets
    /// yield the rest pose with `reachable` cleared.
    pub fn solve_with_fallback(chain: &ArmChain, target: DVec3) -> SolveResult {
        let distance = chain.distance_to(target);

        match Self::solve(chain, target) {
            Ok(angles) => SolveResult {
                angles,
                reachable: true,
                distance,
            },
            Err(e) => {
                log::warn!("{e}, falling back to rest pose");
                SolveResult {
                    angles: JointAngles::ZERO,
                    reachable: false,
                    distance,
                }
            }
        }
    }
}

/// Solves `target` for an arm with the given link lengths, using the default
/// tolerance and the elbow-up branch.
pub fn solve(target: DVec3, links: LinkLengths) -> Result<JointAngles, IkError> {
    AnalyticSolver::solve(&ArmChain::new(links), target)
}

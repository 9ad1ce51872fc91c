use thiserror::Error;

/// Errors raised by arm configuration and the IK solver.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IkError {
    /// The target lies outside the annulus `[|L1 - L2|, L1 + L2]`.
    #[error("Target unreachable: distance {distance} outside workspace [{min_reach}, {max_reach}]")]
    TargetUnreachable {
        distance: f64,
        min_reach: f64,
        max_reach: f64,
    },

    #[error("Invalid length for link {link}: {value} (must be finite and > 0)")]
    InvalidLinkLength { link: u8, value: f64 },

    #[error("Invalid reach tolerance: {value} (must be finite)")]
    InvalidReachTolerance { value: f64 },
}

impl IkError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, IkError::TargetUnreachable { .. })
    }
}

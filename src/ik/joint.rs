use std::fmt;

/// The three actuated joints of the arm, base first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Base, Joint::Shoulder, Joint::Elbow];

    pub fn index(self) -> usize {
        match self {
            Joint::Base => 0,
            Joint::Shoulder => 1,
            Joint::Elbow => 2,
        }
    }
}

/// Joint angles in radians.
///
/// `base_yaw` turns the work plane about the vertical axis, `shoulder_pitch`
/// raises the first segment from the horizontal and `elbow_pitch` is the bend
/// of the second segment relative to the first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub base_yaw: f64,
    pub shoulder_pitch: f64,
    pub elbow_pitch: f64,
}

impl JointAngles {
    /// Rest pose, also the fallback for unreachable targets.
    pub const ZERO: Self = Self {
        base_yaw: 0.0,
        shoulder_pitch: 0.0,
        elbow_pitch: 0.0,
    };

    pub fn new(base_yaw: f64, shoulder_pitch: f64, elbow_pitch: f64) -> Self {
        Self {
            base_yaw,
            shoulder_pitch,
            elbow_pitch,
        }
    }

    pub fn get(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Base => self.base_yaw,
            Joint::Shoulder => self.shoulder_pitch,
            Joint::Elbow => self.elbow_pitch,
        }
    }

    pub fn set(&mut self, joint: Joint, angle: f64) {
        match joint {
            Joint::Base => self.base_yaw = angle,
            Joint::Shoulder => self.shoulder_pitch = angle,
            Joint::Elbow => self.elbow_pitch = angle,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.base_yaw.is_finite() && self.shoulder_pitch.is_finite() && self.elbow_pitch.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.base_yaw, self.shoulder_pitch, self.elbow_pitch]
    }
}

impl From<[f64; 3]> for JointAngles {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "yaw {:.4} rad, shoulder {:.4} rad, elbow {:.4} rad",
            self.base_yaw, self.shoulder_pitch, self.elbow_pitch
        )
    }
}

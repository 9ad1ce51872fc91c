/// Finger offset from the gripper centre when open.
pub const FINGER_OFFSET_OPEN: f64 = 0.15;
/// Finger offset from the gripper centre when closed.
pub const FINGER_OFFSET_CLOSED: f64 = 0.05;

/// Open/closed state of the two-finger gripper. Independent of the arm pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gripper {
    open: bool,
}

impl Gripper {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flips the state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Lateral offsets of the left and right fingers.
    pub fn finger_offsets(&self) -> (f64, f64) {
        let offset = if self.open {
            FINGER_OFFSET_OPEN
        } else {
            FINGER_OFFSET_CLOSED
        };
        (-offset, offset)
    }
}

use glam::{DMat4, DQuat, DVec3};

/// Rigid transform (rotation then translation) in arm-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: DQuat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Yaw about the vertical (+Z) axis.
    pub fn yaw(angle: f64) -> Self {
        Self::from_rotation(DQuat::from_rotation_z(angle))
    }

    /// Pitch inside the local XZ plane; positive angles lift +X toward +Z.
    pub fn pitch(angle: f64) -> Self {
        Self::from_rotation(DQuat::from_rotation_y(-angle))
    }

    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Local axis a link extends along.
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.position
    }

    pub fn transform_direction(&self, direction: DVec3) -> DVec3 {
        self.rotation * direction
    }

    /// Composes `child` expressed in this frame into the parent frame.
    pub fn then(&self, child: &Self) -> Self {
        Self {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

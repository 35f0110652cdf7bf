use glam::{Affine3A, Quat, Vec3};

/// Position and orientation of a character in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a transform facing +Z at the given position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a transform rotated by `yaw` radians about +Y.
    pub fn with_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Unit vector the transform is facing.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local-to-world matrix.
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }

    /// Expresses a world-space point in this transform's local space.
    ///
    /// In local space +Z is ahead and +X is to the side a positive yaw turns toward.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.matrix().inverse().transform_point3(point)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Rotates about +Y by `angle` radians.
    pub fn turn(&mut self, angle: f32) {
        self.rotation = (Quat::from_rotation_y(angle) * self.rotation).normalize();
    }

    /// Pure pursuit steering toward `target` for one step of `dt` seconds.
    ///
    /// When the target lies ahead the transform advances by
    /// `min(max_speed, forward_distance) * dt` and turns by the lateral share
    /// of the distance scaled by `max_turn_rate * dt`. Otherwise it turns in
    /// place at the full turn rate toward the target's side.
    ///
    /// Returns the planar distance to the target after the step.
    pub fn pursue(&mut self, target: Vec3, dt: f32, max_speed: f32, max_turn_rate: f32) -> f32 {
        let local = self.to_local(target);
        let distance = local.x.hypot(local.z);
        if distance <= f32::EPSILON {
            return 0.0;
        }

        if local.z > 0.0 {
            let step = max_speed.min(local.z) * dt;
            self.position += self.forward() * step;
            self.turn(max_turn_rate * dt * (local.x / distance));
        } else {
            let side = if local.x < 0.0 { -1.0 } else { 1.0 };
            self.turn(side * max_turn_rate * dt);
        }

        let remaining = self.to_local(target);
        remaining.x.hypot(remaining.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//! Spatial primitives used by hostile steering and leash checks.
//!
//! Positions are world-space [`glam::Vec3`]; orientation is a yaw rotation
//! about +Y with +Z as the forward axis.
mod transform;

pub use glam::{Affine3A, Quat, Vec3};
pub use transform::Transform;

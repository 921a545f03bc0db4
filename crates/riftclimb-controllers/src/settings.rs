use riftclimb_core::{types::Vec3, vec3};
use serde::{Deserialize, Serialize};

use crate::helpers::Side;

/// Hand placement relative to a grab point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandPlacement {
    pub y_offset: f32,
    pub lateral_offset: f32,
    pub forward_position: f32,
    /// Euler degrees on top of the grab rotation.
    pub left_hand_rotation: Vec3,
    pub right_hand_rotation: Vec3,
}

impl Default for HandPlacement {
    fn default() -> Self {
        Self {
            y_offset: 0.06,
            lateral_offset: 0.1,
            forward_position: -0.02,
            left_hand_rotation: vec3(0.0, 0.0, 90.0),
            right_hand_rotation: vec3(0.0, 0.0, -90.0),
        }
    }
}

impl HandPlacement {
    #[inline] pub fn hand_rotation(&self, side: Side) -> Vec3 {
        match side { Side::Left => self.left_hand_rotation, Side::Right => self.right_hand_rotation }
    }
}

/// Pose solver tuning and wall-ray layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub arm_angle_scaling: f32,
    pub root_movement_height: f32,
    pub raycast_distance: f32,
    pub raycast_back_distance: f32,
    pub raycast_height: f32,
    pub lower_raycast_count: u32,
    pub lower_raycast_spacing: f32,
    pub support_threshold: f32,
    pub flush_epsilon: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            arm_angle_scaling: 1.2,
            root_movement_height: 0.8,
            raycast_distance: 2.0,
            raycast_back_distance: 1.0,
            raycast_height: 0.65,
            lower_raycast_count: 5,
            lower_raycast_spacing: 0.05,
            support_threshold: 30.0,
            flush_epsilon: 0.1,
        }
    }
}

/// Rig landmarks in agent-root space (root at the feet, +Z forward).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub shoulder_root: Vec3,
    pub left_arm_root: Vec3,
    pub right_arm_root: Vec3,
    pub left_foot_tip: Vec3,
    pub right_foot_tip: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            shoulder_root: vec3(0.0, 1.4, 0.0),
            left_arm_root: vec3(-0.18, 1.38, 0.0),
            right_arm_root: vec3(0.18, 1.38, 0.0),
            left_foot_tip: vec3(-0.12, 0.05, 0.08),
            right_foot_tip: vec3(0.12, 0.05, 0.08),
        }
    }
}

impl RigConfig {
    #[inline] pub fn arm_center(&self) -> Vec3 { (self.left_arm_root + self.right_arm_root) * 0.5 }
    #[inline] pub fn foot_tip(&self, side: Side) -> Vec3 {
        match side { Side::Left => self.left_foot_tip, Side::Right => self.right_foot_tip }
    }
}

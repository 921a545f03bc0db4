use riftclimb_controllers::{BodySettings, HandPlacement, RigConfig};
use serde::{Deserialize, Serialize};

/// Swap, traversal and free-surface search tuning.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbSettings {
    /// Seconds per hand or foot move.
    pub effector_lerp_time: f32,
    pub hand_traversal_radius: f32,
    pub edge_swap_threshold_y: f32,
    pub edge_swap_threshold_xz: f32,
    pub free_ray_length: f32,
}

impl Default for ClimbSettings {
    fn default() -> Self {
        Self {
            effector_lerp_time: 0.5,
            hand_traversal_radius: 0.6,
            edge_swap_threshold_y: 0.6,
            edge_swap_threshold_xz: 0.9,
            free_ray_length: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    pub hooking_distance_xz: f32,
    pub hooking_distance_y: f32,
    /// Root height below the grab point.
    pub transform_height: f32,
    pub wall_distance: f32,
    pub exit_time: f32,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self { hooking_distance_xz: 0.8, hooking_distance_y: 0.25, transform_height: 1.1, wall_distance: 0.4, exit_time: 0.3 }
    }
}

/// Floor ray above and in front of the grab.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallTopSettings {
    pub forward_position: f32,
    pub position_y: f32,
    pub radius: f32,
    pub floor_detection_distance: f32,
    pub exit_time: f32,
}

impl Default for WallTopSettings {
    fn default() -> Self {
        Self { forward_position: 0.3, position_y: 0.35, radius: 0.2, floor_detection_distance: 0.5, exit_time: 1.2 }
    }
}

/// Everything the climb machine is tuned by.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    pub hand: HandPlacement,
    pub body: BodySettings,
    pub rig: RigConfig,
    pub climb: ClimbSettings,
    pub hook: HookSettings,
    pub wall_top: WallTopSettings,
}

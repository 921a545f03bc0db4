use riftclimb_edges::EdgeDetectionSettings;
use riftclimb_locomotion::ClimbConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{name} window is empty ({min} >= {max})")]
    EmptyWindow { name: &'static str, min: f32, max: f32 },
}

/// Every climb tunable for one agent type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbProfile {
    pub edges: EdgeDetectionSettings,
    pub climb: ClimbConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ProfileError> {
    if value > 0.0 { Ok(()) } else { Err(ProfileError::NotPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ProfileError> {
    if value >= 0.0 { Ok(()) } else { Err(ProfileError::Negative { field, value }) }
}

fn window(name: &'static str, min: f32, max: f32) -> Result<(), ProfileError> {
    if min < max { Ok(()) } else { Err(ProfileError::EmptyWindow { name, min, max }) }
}

impl ClimbProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        let e = &self.edges;
        non_negative("edges.min_edge_width", e.min_edge_width)?;
        positive("edges.search_radius", e.search_radius)?;
        window("edges.vertical_edge_angle", e.min_vertical_edge_angle, e.max_vertical_edge_angle)?;
        window("edges.triangle_neighbour_angle", e.min_triangle_neighbour_angle, e.max_triangle_neighbour_angle)?;

        let c = &self.climb;
        positive("climb.effector_lerp_time", c.climb.effector_lerp_time)?;
        positive("climb.hand_traversal_radius", c.climb.hand_traversal_radius)?;
        positive("climb.edge_swap_threshold_y", c.climb.edge_swap_threshold_y)?;
        positive("climb.edge_swap_threshold_xz", c.climb.edge_swap_threshold_xz)?;
        positive("climb.free_ray_length", c.climb.free_ray_length)?;
        positive("hook.hooking_distance_xz", c.hook.hooking_distance_xz)?;
        positive("hook.hooking_distance_y", c.hook.hooking_distance_y)?;
        non_negative("hook.exit_time", c.hook.exit_time)?;
        non_negative("wall_top.radius", c.wall_top.radius)?;
        positive("wall_top.floor_detection_distance", c.wall_top.floor_detection_distance)?;
        non_negative("wall_top.exit_time", c.wall_top.exit_time)?;
        positive("body.raycast_distance", c.body.raycast_distance)?;
        positive("body.support_threshold", c.body.support_threshold)?;
        non_negative("body.flush_epsilon", c.body.flush_epsilon)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn defaults_are_valid() {
        assert_eq!(ClimbProfile::default().validate(), Ok(()));
    }

    #[test] fn rejects_zero_lerp_time() {
        let mut p = ClimbProfile::default();
        p.climb.climb.effector_lerp_time = 0.0;
        assert_eq!(
            p.validate(),
            Err(ProfileError::NotPositive { field: "climb.effector_lerp_time", value: 0.0 })
        );
    }

    #[test] fn rejects_inverted_window() {
        let mut p = ClimbProfile::default();
        p.edges.min_vertical_edge_angle = 140.0;
        assert!(matches!(p.validate(), Err(ProfileError::EmptyWindow { name: "edges.vertical_edge_angle", .. })));
    }

    #[test] fn partial_json_keeps_defaults() {
        let p: ClimbProfile = serde_json::from_str(r#"{ "climb": { "hook": { "exit_time": 0.5 } } }"#).unwrap();
        assert_eq!(p.climb.hook.exit_time, 0.5);
        assert_eq!(p.edges, EdgeDetectionSettings::default());
        assert_eq!(p.climb.hand, ClimbProfile::default().climb.hand);
    }
}

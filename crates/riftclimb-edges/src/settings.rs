use serde::{Deserialize, Serialize};

/// Edge filters. Angles in degrees, lengths in metres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDetectionSettings {
    pub min_edge_width: f32,
    /// A face counts as a ledge top when its normal is within this angle of up.
    pub horizontal_alignment: f32,
    pub min_vertical_edge_angle: f32,
    pub max_vertical_edge_angle: f32,
    pub min_triangle_neighbour_angle: f32,
    pub max_triangle_neighbour_angle: f32,
    pub search_radius: f32,
}

impl Default for EdgeDetectionSettings {
    fn default() -> Self {
        Self {
            min_edge_width: 0.2,
            horizontal_alignment: 40.0,
            min_vertical_edge_angle: 50.0,
            max_vertical_edge_angle: 130.0,
            min_triangle_neighbour_angle: 30.0,
            max_triangle_neighbour_angle: 160.0,
            search_radius: 1.5,
        }
    }
}

//! Tool configuration and the settings-dialog merge.

use crate::float_types::Real;
use nalgebra::Vector3;

/// Per-session tool configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Display length for the normal and in-plane axis indicators.
    pub normal_length: Real,
    /// Inclusion radius of the tagging brush; zero tags single vertices.
    pub brush_radius: Real,
    /// Hop budget of the tagging brush traversal.
    pub brush_hops: u32,
    /// Reference axis toward which fitted normals are flipped.
    pub up: Vector3<Real>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        ToolSettings {
            normal_length: 10.0,
            brush_radius: 0.0,
            brush_hops: 5,
            up: Vector3::z(),
        }
    }
}

/// One round of the settings dialog. An absent field keeps its prior value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsInput {
    pub normal_length: Option<Real>,
    pub brush_radius: Option<Real>,
    pub brush_hops: Option<u32>,
}

impl ToolSettings {
    /// Merge dialog input over the current values.
    pub fn apply(&mut self, input: SettingsInput) {
        if let Some(length) = input.normal_length {
            self.normal_length = length;
        }
        if let Some(radius) = input.brush_radius {
            self.brush_radius = radius.max(0.0);
        }
        if let Some(hops) = input.brush_hops {
            self.brush_hops = hops;
        }
    }
}

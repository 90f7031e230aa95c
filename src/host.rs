//! Host-environment boundary.
//!
//! The engine never talks to a concrete host: picking, drawing, document
//! mutation, and the settings dialog arrive through these traits,
//! implemented by the embedder (and by mocks in the test suite). Host
//! failures are out of scope; the engine treats these surfaces as
//! reliable.

use crate::config::{SettingsInput, ToolSettings};
use crate::float_types::Real;
use crate::graph::{VertexGraph, VertexId};
use nalgebra::{Matrix4, Point3};
use std::sync::Arc;

/// An exact vertex snap under the cursor.
#[derive(Debug, Clone)]
pub struct VertexPick {
    /// Graph owning the picked vertex.
    pub graph: Arc<VertexGraph>,
    pub vertex: VertexId,
    /// Coordinate transform in effect at the picked location; identity
    /// unless the vertex belongs to a nested instance.
    pub transform: Matrix4<Real>,
}

/// A resolved screen position.
#[derive(Debug, Clone)]
pub struct Pick {
    /// Zero when the pick snapped exactly to a vertex.
    pub degrees_of_freedom: u8,
    /// Resolved 3D position, inferred when nothing was hit exactly.
    pub position: Point3<Real>,
    pub vertex: Option<VertexPick>,
}

impl Pick {
    /// The picked vertex, present only for an exact snap.
    pub fn vertex_snap(&self) -> Option<&VertexPick> {
        if self.degrees_of_freedom == 0 {
            self.vertex.as_ref()
        } else {
            None
        }
    }
}

/// Keyboard input forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    /// The alt-equivalent modifier that holds the transient preview.
    Alt,
    /// Any other key, by host-specific code.
    Other(u32),
}

/// Pick resolution and user guidance surface of the host view.
pub trait View {
    /// Resolve a screen position; `None` when nothing sensible is under
    /// the cursor.
    fn pick(&mut self, x: Real, y: Real) -> Option<Pick>;
    /// Status-line guidance text. Not part of program state.
    fn set_status(&mut self, text: &str);
    /// Request a redraw.
    fn invalidate(&mut self);
}

/// RGB drawing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 128, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
}

/// Marker glyph for [`DrawingContext::draw_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStyle {
    OpenSquare,
    FilledSquare,
    Plus,
    Cross,
    Star,
    OpenCircle,
    FilledCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

/// Immediate-mode overlay drawing primitives.
pub trait DrawingContext {
    fn draw_points(
        &mut self,
        points: &[Point3<Real>],
        size: u32,
        style: PointStyle,
        color: Color,
    );
    fn set_color(&mut self, color: Color);
    fn set_stroke(&mut self, stroke: StrokeStyle);
    fn draw_line(&mut self, from: Point3<Real>, to: Point3<Real>);
    fn draw_polyline(&mut self, points: &[Point3<Real>]);
}

/// Identifies transient preview geometry for later removal.
pub type PreviewHandle = u64;

/// Mutations of the host's active document.
pub trait Document {
    /// Create a planar face spanning `corners`.
    fn add_face(&mut self, corners: &[Point3<Real>; 4]);
    /// Create a line segment.
    fn add_line(&mut self, from: Point3<Real>, to: Point3<Real>);
    /// Place one instance of a named prototype object under `transform`.
    fn place_instance(&mut self, prototype: &str, transform: &Matrix4<Real>);
    /// Create a non-persistent preview face; removed via the handle.
    fn add_preview_face(&mut self, corners: &[Point3<Real>; 4]) -> PreviewHandle;
    fn remove_preview(&mut self, preview: PreviewHandle);
}

/// Modal settings dialog. `None` means the user cancelled.
pub trait SettingsPrompt {
    fn prompt(&mut self, current: &ToolSettings) -> Option<SettingsInput>;
}

//! Growing point set and incremental plane refitting.
//!
//! The accumulator owns the points sampled during one tagging session,
//! deduplicated by originating vertex identity, and keeps the derived
//! centroid/plane/normal in step with every accepted addition. Correctness
//! over asymptotics: the fit is recomputed in full each time, which is
//! plenty at interactive point-set sizes.

use crate::config::ToolSettings;
use crate::float_types::Real;
use crate::graph::{GraphId, VertexGraph, VertexId};
use crate::plane::{Plane, centroid};
use hashbrown::HashSet;
use log::debug;
use nalgebra::{Matrix4, Point3, Vector3};

/// Values derived from the current point set, defined only with three or
/// more non-degenerate points.
#[derive(Debug, Clone)]
pub struct PlaneFit {
    /// Arithmetic mean of all accumulated points.
    pub centroid: Point3<Real>,
    /// Best-fit plane, oriented to agree with [`PlaneFit::normal`].
    pub plane: Plane,
    /// Centroid projected onto the fitted plane.
    pub projected_centroid: Point3<Real>,
    /// Unit normal, flipped so its component along the configured up axis
    /// is never negative.
    pub normal: Vector3<Real>,
}

#[derive(Debug, Clone, Default)]
pub struct PlaneAccumulator {
    points: Vec<Point3<Real>>,
    tagged: HashSet<(GraphId, VertexId)>,
    fit: Option<PlaneFit>,
}

impl PlaneAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points sampled so far, in tag order.
    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current fit, `None` while the plane is undefined.
    pub fn fit(&self) -> Option<&PlaneFit> {
        self.fit.as_ref()
    }

    /// Drop all points, tags, and the fit.
    pub fn clear(&mut self) {
        self.points.clear();
        self.tagged.clear();
        self.fit = None;
    }

    /// Tag the neighborhood of `vertex` and refit the plane.
    ///
    /// Runs the bounded search with the session's brush budget and appends
    /// one transformed sample per vertex identity not seen before in this
    /// session. Returns whether the point set changed, which is the
    /// caller's redraw signal. Re-tagging an already-covered region is a
    /// no-op.
    pub fn add_to_plane(
        &mut self,
        graph: &VertexGraph,
        vertex: VertexId,
        transform: &Matrix4<Real>,
        settings: &ToolSettings,
    ) -> bool {
        let found = graph.find_near(vertex, settings.brush_hops, settings.brush_radius);
        debug!("found {} vertices near vertex {}", found.len(), vertex);

        let mut added = false;
        for v in found {
            if self.tagged.insert((graph.id(), v))
                && let Some(position) = graph.position(v)
            {
                self.points.push(transform.transform_point(&position));
                added = true;
            }
        }
        if !added {
            return false;
        }

        self.refit(settings);
        true
    }

    fn refit(&mut self, settings: &ToolSettings) {
        self.fit = None;
        if self.points.len() < 3 {
            return;
        }
        let Some(center) = centroid(&self.points) else {
            return;
        };
        match Plane::fit(&self.points) {
            Ok(mut plane) => {
                if plane.normal().dot(&settings.up) < 0.0 {
                    plane.flip();
                }
                self.fit = Some(PlaneFit {
                    centroid: center,
                    projected_centroid: plane.project_point(&center),
                    normal: plane.normal(),
                    plane,
                });
            },
            // Degenerate point sets leave the plane undefined; tagging more
            // vertices can still recover it.
            Err(err) => debug!("plane fit unavailable: {err}"),
        }
    }
}

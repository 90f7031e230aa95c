//! Vertex/edge adjacency graph and the bounded neighborhood search used to
//! select which vertices feed the plane accumulator.
//!
//! A [`VertexGraph`] owns vertex positions and the adjacency induced by its
//! edge elements. Graph content is the sum type [`GraphElement`]: either a
//! plain edge between two vertices of this graph, or a nested
//! [`GraphInstance`] carrying its own coordinate frame. Traversal follows
//! edges only; instanced content is reached through picks, which resolve to
//! the inner graph together with the accumulated transform.

use crate::float_types::Real;
use hashbrown::HashSet;
use nalgebra::{Matrix4, Point3};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Index of a vertex within its owning [`VertexGraph`].
pub type VertexId = usize;

/// Process-unique identity of a [`VertexGraph`].
///
/// Vertex identity across nested instances is the pair
/// `(GraphId, VertexId)`; two instances of the same definition share one
/// graph and therefore one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Content reachable while walking a graph.
#[derive(Debug, Clone)]
pub enum GraphElement {
    /// An edge between two vertices of this graph.
    Edge(VertexId, VertexId),
    /// An instanced sub-object with its own frame.
    Instance(GraphInstance),
}

/// A shared sub-graph placed under a local-to-parent transform.
#[derive(Debug, Clone)]
pub struct GraphInstance {
    pub graph: Arc<VertexGraph>,
    pub transform: Matrix4<Real>,
}

impl GraphInstance {
    /// Position of an inner vertex expressed in the parent frame, or `None`
    /// when the id is out of range.
    pub fn position(&self, vertex: VertexId) -> Option<Point3<Real>> {
        self.graph
            .position(vertex)
            .map(|p| self.transform.transform_point(&p))
    }
}

/// A mesh's vertex/edge connectivity, read-only to the engine.
#[derive(Debug, Clone, Default)]
pub struct VertexGraph {
    id: GraphId,
    positions: Vec<Point3<Real>>,
    adjacency: Vec<Vec<VertexId>>,
    instances: Vec<GraphInstance>,
}

impl Default for GraphId {
    fn default() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl VertexGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn id(&self) -> GraphId {
        self.id
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn add_vertex(&mut self, position: Point3<Real>) -> VertexId {
        self.positions.push(position);
        self.adjacency.push(Vec::new());
        self.positions.len() - 1
    }

    pub fn add_element(&mut self, element: GraphElement) {
        match element {
            GraphElement::Edge(a, b) => self.add_edge(a, b),
            GraphElement::Instance(instance) => self.instances.push(instance),
        }
    }

    /// Connect two vertices. Out-of-range ids and self-loops are ignored.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) {
        if a == b || a >= self.positions.len() || b >= self.positions.len() {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
            self.adjacency[b].push(a);
        }
    }

    pub fn position(&self, vertex: VertexId) -> Option<Point3<Real>> {
        self.positions.get(vertex).copied()
    }

    /// Vertices sharing an edge with `vertex`.
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Nested instances placed in this graph.
    pub fn instances(&self) -> &[GraphInstance] {
        &self.instances
    }

    /// Vertices within `radius` of `origin`'s position, reachable in fewer
    /// than `max_hops` edge steps.
    ///
    /// Traversal itself is not stopped by the radius: far vertices are
    /// walked through, only inclusion in the result is radius-gated. A
    /// `radius` of zero disables expansion entirely, so the origin alone is
    /// evaluated (and included, since its distance is zero). `max_hops` of
    /// zero evaluates nothing.
    pub fn find_near(
        &self,
        origin: VertexId,
        max_hops: u32,
        radius: Real,
    ) -> HashSet<VertexId> {
        let mut found = HashSet::new();
        let mut visited = HashSet::new();
        self.find_near_into(origin, max_hops, radius, &mut visited, &mut found);
        found
    }

    /// Worklist form of [`find_near`](Self::find_near) with caller-owned
    /// visited and result sets.
    ///
    /// Level-order expansion keeps the result independent of edge insertion
    /// order and monotone in `max_hops`.
    pub fn find_near_into(
        &self,
        origin: VertexId,
        max_hops: u32,
        radius: Real,
        visited: &mut HashSet<VertexId>,
        found: &mut HashSet<VertexId>,
    ) {
        let Some(origin_pos) = self.position(origin) else {
            return;
        };

        let mut frontier = vec![origin];
        let mut next = Vec::new();
        for _ in 0..max_hops {
            if frontier.is_empty() {
                break;
            }
            for vertex in frontier.drain(..) {
                if !visited.insert(vertex) {
                    continue;
                }
                if (self.positions[vertex] - origin_pos).norm() <= radius {
                    found.insert(vertex);
                }
                if radius > 0.0 {
                    next.extend(
                        self.adjacency[vertex]
                            .iter()
                            .copied()
                            .filter(|n| !visited.contains(n)),
                    );
                }
            }
            std::mem::swap(&mut frontier, &mut next);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// v0 - v1 - v2 - v3, unit spacing along x.
    fn path_graph() -> VertexGraph {
        let mut g = VertexGraph::new();
        for i in 0..4 {
            g.add_vertex(Point3::new(i as Real, 0.0, 0.0));
        }
        for i in 0..3 {
            g.add_element(GraphElement::Edge(i, i + 1));
        }
        g
    }

    fn tetrahedron() -> VertexGraph {
        let mut g = VertexGraph::new();
        g.add_vertex(Point3::new(0.0, 0.0, 0.0));
        g.add_vertex(Point3::new(1.0, 0.0, 0.0));
        g.add_vertex(Point3::new(0.5, 1.0, 0.0));
        g.add_vertex(Point3::new(0.5, 0.5, 1.0));
        for a in 0..4 {
            for b in (a + 1)..4 {
                g.add_edge(a, b);
            }
        }
        g
    }

    #[test]
    fn zero_hops_finds_nothing() {
        let g = path_graph();
        assert!(g.find_near(0, 0, 100.0).is_empty());
    }

    #[test]
    fn zero_radius_is_single_vertex_mode() {
        let g = path_graph();
        for hops in 1..5 {
            let found = g.find_near(1, hops, 0.0);
            assert_eq!(found.len(), 1);
            assert!(found.contains(&1));
        }
    }

    #[test]
    fn result_grows_with_hops() {
        let g = path_graph();
        let mut previous = HashSet::new();
        for hops in 0..6 {
            let found = g.find_near(0, hops, 100.0);
            assert!(
                previous.iter().all(|v| found.contains(v)),
                "hops={hops} shrank the result"
            );
            previous = found;
        }
        // Whole path reachable once hops exceed its length.
        assert_eq!(previous.len(), 4);
    }

    #[test]
    fn radius_gates_inclusion_not_traversal() {
        // v1 sits far from v0, but bridges to v2 which is close again.
        let mut g = VertexGraph::new();
        let v0 = g.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = g.add_vertex(Point3::new(10.0, 0.0, 0.0));
        let v2 = g.add_vertex(Point3::new(0.5, 0.0, 0.0));
        g.add_edge(v0, v1);
        g.add_edge(v1, v2);

        let found = g.find_near(v0, 3, 1.0);
        assert!(found.contains(&v0));
        assert!(!found.contains(&v1));
        assert!(found.contains(&v2));
    }

    #[test]
    fn tetrahedron_fully_tagged_in_two_hops() {
        let g = tetrahedron();
        let found = g.find_near(0, 2, 1000.0);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn out_of_range_origin_finds_nothing() {
        let g = path_graph();
        assert!(g.find_near(99, 5, 100.0).is_empty());
    }

    #[test]
    fn instance_positions_resolve_through_transform() {
        let inner = Arc::new({
            let mut g = VertexGraph::new();
            g.add_vertex(Point3::new(1.0, 0.0, 0.0));
            g
        });
        let shifted = nalgebra::Translation3::new(0.0, 0.0, 5.0).to_homogeneous();
        let mut outer = VertexGraph::new();
        outer.add_element(GraphElement::Instance(GraphInstance {
            graph: inner,
            transform: shifted,
        }));

        let instance = &outer.instances()[0];
        assert_eq!(
            instance.position(0),
            Some(Point3::new(1.0, 0.0, 5.0))
        );
        assert_eq!(instance.position(7), None);
    }

    #[test]
    fn graph_ids_are_unique() {
        assert_ne!(VertexGraph::new().id(), VertexGraph::new().id());
    }
}

//! Clusters
//!
//! Weighted union-find over the decoding graph vertices, augmented with the
//! per-cluster state the syndrome validation loop needs: parity (with -1
//! marking a cluster absorbed by the open boundary), accumulated growth, a
//! frontier row in the [`BoundaryStore`] and a min-priority grow queue keyed
//! on `(boundary size, cluster growth, root)`.
//!
//! The grow queue admits stale entries instead of implementing decrease-key:
//! a popped entry is discarded unless its stored key still matches the
//! cluster's current key and its root is still a root. Clusters only ever
//! grow, so a stale key is always strictly smaller than the live one and
//! discarding it cannot skip over a smaller valid cluster. Growth values are
//! compared exactly; this is sound because every cluster accumulates the same
//! increments in a single deterministic order.
//!

use crate::cluster_boundary::*;
use crate::decoding_graph::*;
use crate::ordered_float::OrderedFloat;
use crate::util::*;
use derivative::Derivative;
use num_traits::Zero;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// one pending entry of the grow queue; the derived ordering is lexicographic
/// over (boundary size, growth, root), making the smallest root the canonical
/// tie-break
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct GrowQueueEntry {
    boundary_size: usize,
    cluster_growth: OrderedFloat,
    cluster_root: VertexIndex,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Clusters {
    #[derivative(Debug = "ignore")]
    graph: Arc<DecodingGraph>,
    max_growth: OrderedFloat,
    /// union-find parent of each vertex, [`NO_CLUSTER`] when unassigned
    parent: Vec<VertexIndex>,
    /// the growth of each edge
    edge_growth: Vec<OrderedFloat>,
    /// the increment in growth for each edge
    growth_increment: Vec<OrderedFloat>,
    /// the parity of each cluster, indexed by root; -1 once the cluster
    /// touches the open boundary
    cluster_parity: Vec<i32>,
    /// which edges have reached maximum growth
    fully_grown_edges: Vec<bool>,
    /// the growth (sum of applied half-edge increments) of each cluster
    cluster_growth: Vec<OrderedFloat>,
    syndrome: Vec<bool>,
    /// roots created during initialization, in creation order
    initial_clusters: Vec<VertexIndex>,
    /// graph-boundary vertices absorbed into some cluster
    physical_boundary_vertices: Vec<bool>,
    /// upper bound on the absorbed boundary vertices; consumers only test
    /// whether it is zero
    num_physical_boundary_vertices: usize,
    boundary: BoundaryStore,
    grow_queue: BinaryHeap<Reverse<GrowQueueEntry>>,
}

impl Clusters {
    #[allow(clippy::unnecessary_cast)]
    pub fn new(
        graph: Arc<DecodingGraph>,
        syndrome: &[bool],
        initial_fully_grown_edges: Option<&[bool]>,
        growth_increments: Option<&[f32]>,
        max_growth: f32,
    ) -> Result<Self, DecoderError> {
        let vertex_num = graph.num_vertices();
        let edge_num = graph.num_edges();
        if syndrome.len() != vertex_num {
            return Err(DecoderError::DimensionMismatch {
                what: "syndrome",
                expected: vertex_num,
                actual: syndrome.len(),
            });
        }
        if let Some(erasure) = initial_fully_grown_edges {
            if erasure.len() != edge_num {
                return Err(DecoderError::DimensionMismatch {
                    what: "erasure",
                    expected: edge_num,
                    actual: erasure.len(),
                });
            }
        }
        let growth_increment = match growth_increments {
            Some(increments) => {
                if increments.len() != edge_num {
                    return Err(DecoderError::DimensionMismatch {
                        what: "growth_increments",
                        expected: edge_num,
                        actual: increments.len(),
                    });
                }
                for (edge_index, &value) in increments.iter().enumerate() {
                    if !value.is_finite() || value <= 0. {
                        return Err(DecoderError::InvalidIncrement { edge_index, value });
                    }
                }
                increments.iter().map(|&value| OrderedFloat::new(value)).collect()
            }
            None => vec![OrderedFloat::new(1.0); edge_num],
        };
        debug_assert!(max_growth.is_finite() && max_growth > 0.);
        let fully_grown_edges = match initial_fully_grown_edges {
            Some(erasure) => erasure.to_vec(),
            None => vec![false; edge_num],
        };
        let boundary = BoundaryStore::new(vertex_num, graph.max_degree());
        let mut clusters = Self {
            graph,
            max_growth: OrderedFloat::new(max_growth),
            parent: vec![NO_CLUSTER; vertex_num],
            edge_growth: vec![OrderedFloat::zero(); edge_num],
            growth_increment,
            cluster_parity: vec![0; vertex_num],
            fully_grown_edges,
            cluster_growth: vec![OrderedFloat::zero(); vertex_num],
            syndrome: syndrome.to_vec(),
            initial_clusters: Vec::new(),
            physical_boundary_vertices: vec![false; vertex_num],
            num_physical_boundary_vertices: 0,
            boundary,
            grow_queue: BinaryHeap::new(),
        };
        if let Some(erasure) = initial_fully_grown_edges {
            clusters.init_edges(erasure, syndrome);
        }
        clusters.init_cluster_roots(syndrome);
        Ok(clusters)
    }

    /// whether the vertex still has at least one incident edge below maximum
    /// growth, i.e. whether it belongs on a cluster frontier
    #[allow(clippy::unnecessary_cast)]
    pub fn has_growing_edge(&self, vertex_index: VertexIndex) -> bool {
        self.graph
            .edges_touching_vertex(vertex_index)
            .iter()
            .any(|&edge_index| !self.fully_grown_edges[edge_index as usize])
    }

    /// absorb one already-fully-grown edge into a cluster during
    /// initialization: re-point both endpoints, account the parity of newly
    /// visited syndrome bits, credit `max_growth` to the cluster and put the
    /// endpoints on the frontier if they can still grow
    #[allow(clippy::unnecessary_cast)]
    fn add_edge_to_cluster(
        &mut self,
        cluster_id: VertexIndex,
        edge_index: EdgeIndex,
        syndrome: &[bool],
        syndrome_visited: &mut [bool],
    ) {
        let (u, v) = self.graph.vertices_of_edge(edge_index);
        self.parent[u as usize] = cluster_id;
        self.parent[v as usize] = cluster_id;

        for &endpoint in [u, v].iter() {
            if !syndrome_visited[endpoint as usize]
                && syndrome[endpoint as usize]
                && self.cluster_parity[cluster_id as usize] >= 0
            {
                self.cluster_parity[cluster_id as usize] += 1;
            }
            syndrome_visited[endpoint as usize] = true;
        }

        self.edge_growth[edge_index as usize] = self.max_growth;
        self.fully_grown_edges[edge_index as usize] = true;
        let max_growth = self.max_growth;
        self.cluster_growth[cluster_id as usize] += max_growth;

        for &endpoint in [u, v].iter() {
            if self.has_growing_edge(endpoint) {
                self.boundary.add(cluster_id, endpoint);
            }
            if self.graph.is_vertex_on_boundary(endpoint) {
                self.physical_boundary_vertices[endpoint as usize] = true;
                self.num_physical_boundary_vertices += 1;
                self.cluster_parity[cluster_id as usize] = -1;
            }
        }
    }

    /// seed clusters from the erasure pattern: each connected component of
    /// initially fully-grown edges becomes one cluster rooted at the first
    /// endpoint of its first-discovered edge
    #[allow(clippy::unnecessary_cast)]
    fn init_edges(&mut self, initial_edges: &[bool], syndrome: &[bool]) {
        let graph = Arc::clone(&self.graph);
        let mut syndrome_visited = vec![false; syndrome.len()];
        let mut edges_visited = vec![false; graph.num_edges()];
        for edge_index in 0..graph.num_edges() {
            if !initial_edges[edge_index] || edges_visited[edge_index] {
                continue;
            }
            let (cluster_id, _) = graph.vertices_of_edge(edge_index as EdgeIndex);
            self.initial_clusters.push(cluster_id);
            self.boundary.add_cluster(cluster_id);
            // vector-backed DFS over the component's edges
            let mut stack = vec![edge_index as EdgeIndex];
            edges_visited[edge_index] = true;
            while let Some(component_edge) = stack.pop() {
                self.add_edge_to_cluster(cluster_id, component_edge, syndrome, &mut syndrome_visited);
                for neighbor_edge in graph.edges_touching_edge(component_edge) {
                    if initial_edges[neighbor_edge as usize] && !edges_visited[neighbor_edge as usize] {
                        edges_visited[neighbor_edge as usize] = true;
                        stack.push(neighbor_edge);
                    }
                }
            }
            self.add_to_grow_queue(cluster_id);
        }
    }

    /// every syndrome vertex not claimed by an erasure component becomes a
    /// singleton cluster of odd parity
    #[allow(clippy::unnecessary_cast)]
    fn init_cluster_roots(&mut self, syndrome: &[bool]) {
        for (vertex_index, &is_defect) in syndrome.iter().enumerate() {
            if is_defect && self.parent[vertex_index] == NO_CLUSTER {
                let vertex_index = vertex_index as VertexIndex;
                self.parent[vertex_index as usize] = vertex_index;
                self.cluster_parity[vertex_index as usize] = 1;
                self.boundary.add_cluster(vertex_index);
                self.boundary.add(vertex_index, vertex_index);
                self.initial_clusters.push(vertex_index);
                self.add_to_grow_queue(vertex_index);
            }
        }
    }

    /// grow every non-fully-grown edge on the cluster frontier by its
    /// increment; an edge reaching maximum growth either claims an
    /// unclustered far vertex or is returned as a merge candidate.
    /// Frontier vertices appended during this call are not grown until the
    /// next call.
    #[allow(clippy::unnecessary_cast)]
    pub fn grow_cluster(&mut self, cluster_id: VertexIndex) -> Vec<EdgeIndex> {
        let graph = Arc::clone(&self.graph);
        let mut possible_edges_to_fuse = Vec::new();
        let frontier_len = self.boundary.size(cluster_id);
        for local_index in 0..frontier_len {
            let frontier_vertex = self.boundary.get(cluster_id, local_index);
            debug_assert_ne!(frontier_vertex, VACANT, "frontier must be compact when growing");
            let edge_indices = graph.edges_touching_vertex(frontier_vertex);
            let vertex_indices = graph.vertices_touching_vertex(frontier_vertex);
            for (&edge_index, &far_vertex) in edge_indices.iter().zip(vertex_indices.iter()) {
                if self.fully_grown_edges[edge_index as usize] {
                    continue;
                }
                let increment = self.growth_increment[edge_index as usize];
                self.edge_growth[edge_index as usize] += increment;
                self.cluster_growth[cluster_id as usize] += increment;
                if self.edge_growth[edge_index as usize] < self.max_growth {
                    continue;
                }
                self.fully_grown_edges[edge_index as usize] = true;
                if self.parent[far_vertex as usize] == NO_CLUSTER {
                    self.parent[far_vertex as usize] = cluster_id;
                    self.boundary.add(cluster_id, far_vertex);
                    if graph.is_vertex_on_boundary(far_vertex) {
                        self.cluster_parity[cluster_id as usize] = -1;
                        self.physical_boundary_vertices[far_vertex as usize] = true;
                        self.num_physical_boundary_vertices += 1;
                    }
                    continue;
                }
                possible_edges_to_fuse.push(edge_index);
            }
        }
        possible_edges_to_fuse
    }

    /// find with path halving; `None` when the vertex has no cluster yet
    #[allow(clippy::unnecessary_cast)]
    pub fn find_cluster_root(&mut self, mut vertex_index: VertexIndex) -> Option<VertexIndex> {
        if self.parent[vertex_index as usize] == NO_CLUSTER {
            return None;
        }
        while self.parent[vertex_index as usize] != vertex_index {
            let old_vertex_index = vertex_index;
            vertex_index = self.parent[old_vertex_index as usize];
            self.parent[old_vertex_index as usize] = self.parent[vertex_index as usize];
        }
        Some(vertex_index)
    }

    /// append the loser's still-growing frontier vertices to the survivor and
    /// re-point them directly
    #[allow(clippy::unnecessary_cast)]
    fn merge_boundary_vertices(&mut self, survivor: VertexIndex, loser: VertexIndex) {
        let frontier_len = self.boundary.size(loser);
        for local_index in 0..frontier_len {
            let vertex_index = self.boundary.get(loser, local_index);
            debug_assert_ne!(vertex_index, VACANT);
            if self.has_growing_edge(vertex_index) {
                self.boundary.add(survivor, vertex_index);
                self.parent[vertex_index as usize] = survivor;
            }
        }
    }

    /// merge two root clusters; the one with the larger boundary survives.
    /// Parities combine additively unless either side is boundary-absorbed.
    #[allow(clippy::unnecessary_cast)]
    pub fn merge_clusters(&mut self, x: VertexIndex, y: VertexIndex) -> VertexIndex {
        debug_assert_eq!(self.parent[x as usize], x, "merge requires roots");
        debug_assert_eq!(self.parent[y as usize], y, "merge requires roots");
        if x == y {
            return x;
        }
        let (x, y) = if self.boundary.size(x) < self.boundary.size(y) {
            (y, x)
        } else {
            (x, y)
        };
        self.parent[y as usize] = x;
        let absorbed_growth = self.cluster_growth[y as usize];
        self.cluster_growth[x as usize] += absorbed_growth;
        if self.cluster_parity[x as usize] >= 0 && self.cluster_parity[y as usize] >= 0 {
            self.cluster_parity[x as usize] += self.cluster_parity[y as usize];
        } else {
            self.cluster_parity[x as usize] = -1;
        }
        self.merge_boundary_vertices(x, y);
        x
    }

    /// drop every frontier vertex whose incident edges are all fully grown,
    /// then compact the row
    pub fn check_boundary_vertices(&mut self, cluster_id: VertexIndex) {
        let frontier_len = self.boundary.size(cluster_id);
        for local_index in 0..frontier_len {
            let vertex_index = self.boundary.get(cluster_id, local_index);
            if vertex_index == VACANT {
                continue;
            }
            if !self.has_growing_edge(vertex_index) {
                self.boundary.remove(cluster_id, local_index);
            }
        }
        self.boundary.defragment(cluster_id);
    }

    /// push a cluster if it is a root of odd parity; boundary-absorbed
    /// clusters (-1) count as even
    #[allow(clippy::unnecessary_cast)]
    pub fn add_to_grow_queue(&mut self, cluster_id: VertexIndex) {
        if self.parent[cluster_id as usize] == cluster_id && self.cluster_parity[cluster_id as usize] % 2 == 1 {
            self.grow_queue.push(Reverse(GrowQueueEntry {
                boundary_size: self.boundary.size(cluster_id),
                cluster_growth: self.cluster_growth[cluster_id as usize],
                cluster_root: cluster_id,
            }));
        }
    }

    /// pop until the top entry still matches the live cluster state, `None`
    /// once the queue drains
    #[allow(clippy::unnecessary_cast)]
    pub fn smallest_odd_cluster(&mut self) -> Option<VertexIndex> {
        while let Some(Reverse(entry)) = self.grow_queue.pop() {
            let cluster_root = entry.cluster_root;
            if self.parent[cluster_root as usize] == cluster_root
                && self.boundary.size(cluster_root) == entry.boundary_size
                && self.cluster_growth[cluster_root as usize] == entry.cluster_growth
            {
                return Some(cluster_root);
            }
        }
        None
    }

    pub fn graph(&self) -> &Arc<DecodingGraph> {
        &self.graph
    }

    pub fn max_growth(&self) -> OrderedFloat {
        self.max_growth
    }

    pub fn syndrome(&self) -> &[bool] {
        &self.syndrome
    }

    /// the raw union-find array; entries are [`NO_CLUSTER`] for unassigned
    /// vertices and not necessarily path-compressed
    pub fn vertex_to_cluster_id(&self) -> &[VertexIndex] {
        &self.parent
    }

    pub fn cluster_parity(&self) -> &[i32] {
        &self.cluster_parity
    }

    pub fn cluster_growth(&self) -> &[OrderedFloat] {
        &self.cluster_growth
    }

    pub fn edge_growth(&self) -> &[OrderedFloat] {
        &self.edge_growth
    }

    pub fn fully_grown_edges(&self) -> &[bool] {
        &self.fully_grown_edges
    }

    pub fn initial_clusters(&self) -> &[VertexIndex] {
        &self.initial_clusters
    }

    pub fn physical_boundary_vertices(&self) -> &[bool] {
        &self.physical_boundary_vertices
    }

    pub fn num_physical_boundary_vertices(&self) -> usize {
        self.num_physical_boundary_vertices
    }

    pub fn boundary(&self) -> &BoundaryStore {
        &self.boundary
    }

    /// defensive sweep of the cheap structural invariants; callers gate it on
    /// debug builds
    #[allow(clippy::unnecessary_cast)]
    pub fn debug_check_invariants(&self) {
        let vertex_num = self.graph.num_vertices();
        for vertex_index in 0..vertex_num {
            let mut cursor = vertex_index as VertexIndex;
            if self.parent[vertex_index] == NO_CLUSTER {
                continue;
            }
            // parent chains terminate at a self-parent within |V| steps
            for _ in 0..=vertex_num {
                let next = self.parent[cursor as usize];
                if next == cursor {
                    break;
                }
                cursor = next;
            }
            assert_eq!(
                self.parent[cursor as usize], cursor,
                "parent chain of vertex {} does not reach a root",
                vertex_index
            );
            assert!(self.cluster_parity[vertex_index] >= -1);
        }
        for edge_index in 0..self.graph.num_edges() {
            assert_eq!(
                self.fully_grown_edges[edge_index],
                self.edge_growth[edge_index] >= self.max_growth,
                "edge {} growth flag diverged from its growth value",
                edge_index
            );
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::decoding_graph::tests::six_vertex_graph;

    pub fn six_vertex_clusters() -> Clusters {
        // syndrome on vertices 1 and 4, edge 5 = (3, 5) pre-erased
        let graph = Arc::new(six_vertex_graph());
        let syndrome = vec![false, true, false, false, true, false];
        let initial_fully_grown = vec![false, false, false, false, false, true];
        let increments = vec![1., 1.5, 1., 1., 1., 1.];
        Clusters::new(graph, &syndrome, Some(&initial_fully_grown), Some(&increments), 2.0).unwrap()
    }

    #[test]
    fn clusters_initialization() {
        // cargo test clusters_initialization -- --nocapture
        let clusters = six_vertex_clusters();
        assert_eq!(clusters.initial_clusters(), &[3, 1, 4]);
        assert_eq!(clusters.fully_grown_edges(), &[false, false, false, false, false, true]);
        assert_eq!(clusters.cluster_growth()[3], clusters.max_growth());
        // the erased component {3, 5} carries no syndrome
        assert_eq!(clusters.cluster_parity()[3], 0);
        assert_eq!(clusters.cluster_parity()[1], 1);
        assert_eq!(clusters.cluster_parity()[4], 1);
        assert!(clusters.boundary().contains(3, 3));
        assert!(clusters.boundary().contains(3, 5));
    }

    #[test]
    fn clusters_possible_edges_to_fuse() {
        // cargo test clusters_possible_edges_to_fuse -- --nocapture
        let mut clusters = six_vertex_clusters();
        let possible_edges = clusters.grow_cluster(1);
        assert_eq!(possible_edges.len(), 0);
        let possible_edges = clusters.grow_cluster(4);
        assert_eq!(possible_edges, vec![4]);
    }

    #[test]
    fn clusters_growth_accumulates_per_half_edge() {
        // cargo test clusters_growth_accumulates_per_half_edge -- --nocapture
        let mut clusters = six_vertex_clusters();
        clusters.grow_cluster(1);
        assert_eq!(clusters.cluster_growth()[1], 1. + 1.5 + 1.);
        assert_eq!(clusters.edge_growth()[1], 1.5);
        assert_eq!(clusters.edge_growth()[0], 1.);
        assert_eq!(clusters.edge_growth()[2], 0.);
    }

    #[test]
    fn clusters_boundary_absorption() {
        // cargo test clusters_boundary_absorption -- --nocapture
        let mut clusters = six_vertex_clusters();
        clusters.grow_cluster(1);
        clusters.grow_cluster(1);
        assert!(clusters.physical_boundary_vertices()[0]);
        assert!(clusters.physical_boundary_vertices()[2]);
        assert_eq!(clusters.num_physical_boundary_vertices(), 2);
        assert_eq!(
            clusters.fully_grown_edges(),
            &[true, true, false, false, true, true]
        );
        assert_eq!(clusters.cluster_parity()[1], -1);
        // the claimed vertices now belong to cluster 1
        assert_eq!(clusters.vertex_to_cluster_id()[0], 1);
        assert_eq!(clusters.vertex_to_cluster_id()[2], 1);
        // frontier is {1, 0, 2}: removal of the saturated vertex 1 is deferred
        let frontier = clusters.boundary().get_boundary(1);
        assert_eq!(frontier.len(), 3);
        for vertex_index in [0, 1, 2] {
            assert!(clusters.boundary().contains(1, vertex_index));
        }
        clusters.debug_check_invariants();
    }

    #[test]
    fn clusters_merge() {
        // cargo test clusters_merge -- --nocapture
        let mut clusters = six_vertex_clusters();
        clusters.grow_cluster(1);
        clusters.grow_cluster(1);
        let survivor = clusters.merge_clusters(1, 4);
        assert_eq!(survivor, 1);
        for vertex_index in [0, 1, 2, 4] {
            assert_eq!(clusters.vertex_to_cluster_id()[vertex_index], 1);
        }
        assert_eq!(clusters.cluster_growth()[1], 1.5 * 2. + 2. + 2.);
        assert_eq!(clusters.cluster_parity()[1], -1);
        assert_eq!(clusters.boundary().size(1), 4);
        for vertex_index in [0, 1, 2, 4] {
            assert!(clusters.boundary().contains(1, vertex_index));
        }
    }

    #[test]
    fn clusters_check_boundary_vertices() {
        // cargo test clusters_check_boundary_vertices -- --nocapture
        let mut clusters = six_vertex_clusters();
        clusters.grow_cluster(1);
        clusters.grow_cluster(1);
        clusters.merge_clusters(1, 4);
        clusters.check_boundary_vertices(1);
        // only vertex 4 keeps a non-fully-grown incident edge
        assert_eq!(clusters.boundary().get_boundary(1), &[4]);
    }

    #[test]
    fn clusters_find_cluster_root() {
        // cargo test clusters_find_cluster_root -- --nocapture
        let mut clusters = six_vertex_clusters();
        assert_eq!(clusters.find_cluster_root(0), None);
        assert_eq!(clusters.find_cluster_root(2), None);
        assert_eq!(clusters.find_cluster_root(4), Some(4));
        assert_eq!(clusters.find_cluster_root(1), Some(1));
        assert_eq!(clusters.find_cluster_root(5), Some(3));
        assert_eq!(clusters.find_cluster_root(3), Some(3));
        clusters.grow_cluster(1);
        clusters.grow_cluster(1);
        assert_eq!(clusters.find_cluster_root(0), Some(1));
        assert_eq!(clusters.find_cluster_root(2), Some(1));
    }

    #[test]
    fn clusters_smallest_odd_cluster() {
        // cargo test clusters_smallest_odd_cluster -- --nocapture
        let mut clusters = six_vertex_clusters();
        // clusters 1 and 4 tie on (boundary size, growth); the root index
        // breaks the tie
        assert_eq!(clusters.smallest_odd_cluster(), Some(1));
        clusters.grow_cluster(1);
        clusters.grow_cluster(1);
        // the entry for cluster 1 is stale now; 4 is untouched
        assert_eq!(clusters.smallest_odd_cluster(), Some(4));
        assert_eq!(clusters.smallest_odd_cluster(), None);
    }

    #[test]
    fn clusters_requeue_after_growth() {
        // cargo test clusters_requeue_after_growth -- --nocapture
        let mut clusters = six_vertex_clusters();
        assert_eq!(clusters.smallest_odd_cluster(), Some(1));
        clusters.grow_cluster(1);
        clusters.check_boundary_vertices(1);
        clusters.add_to_grow_queue(1);
        // fresh entry matches the larger growth value now
        assert_eq!(clusters.smallest_odd_cluster(), Some(4));
        clusters.grow_cluster(4);
        clusters.check_boundary_vertices(4);
        clusters.add_to_grow_queue(4);
        // cluster 4 accumulated less growth than cluster 1 and goes first
        assert_eq!(clusters.smallest_odd_cluster(), Some(4));
        assert_eq!(clusters.smallest_odd_cluster(), Some(1));
    }

    #[test]
    fn clusters_rejects_bad_increments() {
        // cargo test clusters_rejects_bad_increments -- --nocapture
        let graph = Arc::new(six_vertex_graph());
        let syndrome = vec![false; 6];
        let increments = vec![1., 1., 0., 1., 1., 1.];
        assert_eq!(
            Clusters::new(Arc::clone(&graph), &syndrome, None, Some(&increments), 2.0).unwrap_err(),
            DecoderError::InvalidIncrement {
                edge_index: 2,
                value: 0.
            }
        );
        let increments = vec![1.; 5];
        assert!(matches!(
            Clusters::new(Arc::clone(&graph), &syndrome, None, Some(&increments), 2.0),
            Err(DecoderError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Clusters::new(graph, &[false; 5], None, None, 2.0),
            Err(DecoderError::DimensionMismatch { .. })
        ));
    }
}

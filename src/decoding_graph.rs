//! Decoding Graph
//!
//! Immutable undirected graph over the stabilizer measurement vertices, with a
//! per-vertex flag marking open-boundary sinks. Incident edges are stored in
//! flattened CSR-like arrays so that every neighborhood query is O(1) or
//! O(deg). A *local edge* is a half-edge addressed as `(vertex, slot)` inside
//! the flat adjacency; two local edges map to the same global edge.
//!

use crate::util::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// construction inputs of a decoding graph, shared with external collaborators
/// (code builders, syndrome samplers, file loaders)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInitializer {
    /// the number of vertices
    pub vertex_num: VertexNum,
    /// undirected edges, where vertex indices are within the range [0, vertex_num)
    pub edges: Vec<(VertexIndex, VertexIndex)>,
    /// whether each vertex sits on the open boundary of the code
    pub vertex_on_boundary: Vec<bool>,
}

impl GraphInitializer {
    pub fn new(
        vertex_num: VertexNum,
        edges: Vec<(VertexIndex, VertexIndex)>,
        vertex_on_boundary: Vec<bool>,
    ) -> Self {
        Self {
            vertex_num,
            edges,
            vertex_on_boundary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodingGraph {
    /// the number of vertices
    vertex_num: VertexNum,
    /// the two endpoints of each edge
    edges: Vec<(VertexIndex, VertexIndex)>,
    /// whether each vertex sits on the open boundary of the code
    vertex_on_boundary: Vec<bool>,
    /// start of each vertex's row in the flat adjacency, length `vertex_num + 1`
    vertex_offset: Vec<usize>,
    /// global edge index of each half-edge
    adj_edges: Vec<EdgeIndex>,
    /// the far endpoint of each half-edge, parallel to `adj_edges`
    adj_vertices: Vec<VertexIndex>,
    /// the two half-edge positions of each global edge
    edge_local_slots: Vec<[usize; 2]>,
    /// normalized `(min, max)` endpoint pair to edge index
    edge_lookup: HashMap<(VertexIndex, VertexIndex), EdgeIndex>,
}

impl DecodingGraph {
    #[allow(clippy::unnecessary_cast)]
    pub fn new(
        vertex_num: VertexNum,
        edges: Vec<(VertexIndex, VertexIndex)>,
        vertex_on_boundary: Vec<bool>,
    ) -> Result<Self, DecoderError> {
        if vertex_on_boundary.len() != vertex_num as usize {
            return Err(DecoderError::InvalidGraph {
                reason: format!(
                    "boundary flags cover {} vertices but the graph has {}",
                    vertex_on_boundary.len(),
                    vertex_num
                ),
            });
        }
        let mut edge_lookup = HashMap::with_capacity(edges.len() * 2);
        for (edge_index, &(u, v)) in edges.iter().enumerate() {
            if u as usize >= vertex_num as usize || v as usize >= vertex_num as usize {
                return Err(DecoderError::InvalidGraph {
                    reason: format!("edge {} = ({}, {}) has an endpoint out of range", edge_index, u, v),
                });
            }
            if u == v {
                return Err(DecoderError::InvalidGraph {
                    reason: format!("edge {} is a self-loop on vertex {}", edge_index, u),
                });
            }
            let key = if u < v { (u, v) } else { (v, u) };
            if let Some(&previous_index) = edge_lookup.get(&key) {
                return Err(DecoderError::InvalidGraph {
                    reason: format!(
                        "duplicate edges {} and {} between vertices ({}, {})",
                        previous_index, edge_index, key.0, key.1
                    ),
                });
            }
            edge_lookup.insert(key, edge_index as EdgeIndex);
        }
        // flatten the adjacency into CSR rows; the order within a row follows
        // the edge input order and is stable across calls
        let mut degrees = vec![0usize; vertex_num as usize];
        for &(u, v) in edges.iter() {
            degrees[u as usize] += 1;
            degrees[v as usize] += 1;
        }
        let mut vertex_offset = Vec::with_capacity(vertex_num as usize + 1);
        let mut offset = 0;
        for vertex_index in 0..vertex_num as usize {
            vertex_offset.push(offset);
            offset += degrees[vertex_index];
        }
        vertex_offset.push(offset);
        let mut adj_edges = vec![0 as EdgeIndex; offset];
        let mut adj_vertices = vec![0 as VertexIndex; offset];
        let mut edge_local_slots = vec![[0usize; 2]; edges.len()];
        let mut cursor = vertex_offset[..vertex_num as usize].to_vec();
        for (edge_index, &(u, v)) in edges.iter().enumerate() {
            let slot_u = cursor[u as usize];
            adj_edges[slot_u] = edge_index as EdgeIndex;
            adj_vertices[slot_u] = v;
            cursor[u as usize] += 1;
            let slot_v = cursor[v as usize];
            adj_edges[slot_v] = edge_index as EdgeIndex;
            adj_vertices[slot_v] = u;
            cursor[v as usize] += 1;
            edge_local_slots[edge_index] = [slot_u, slot_v];
        }
        Ok(Self {
            vertex_num,
            edges,
            vertex_on_boundary,
            vertex_offset,
            adj_edges,
            adj_vertices,
            edge_local_slots,
            edge_lookup,
        })
    }

    pub fn from_initializer(initializer: &GraphInitializer) -> Result<Self, DecoderError> {
        Self::new(
            initializer.vertex_num,
            initializer.edges.clone(),
            initializer.vertex_on_boundary.clone(),
        )
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn num_vertices(&self) -> usize {
        self.vertex_num as usize
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// the number of half-edges in the flat adjacency
    pub fn num_local_edges(&self) -> usize {
        2 * self.edges.len()
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn vertices_of_edge(&self, edge_index: EdgeIndex) -> (VertexIndex, VertexIndex) {
        self.edges[edge_index as usize]
    }

    /// global edge indices incident to a vertex
    #[allow(clippy::unnecessary_cast)]
    pub fn edges_touching_vertex(&self, vertex_index: VertexIndex) -> &[EdgeIndex] {
        let start = self.vertex_offset[vertex_index as usize];
        let end = self.vertex_offset[vertex_index as usize + 1];
        &self.adj_edges[start..end]
    }

    /// the far endpoints of the incident edges, parallel to [`Self::edges_touching_vertex`]
    #[allow(clippy::unnecessary_cast)]
    pub fn vertices_touching_vertex(&self, vertex_index: VertexIndex) -> &[VertexIndex] {
        let start = self.vertex_offset[vertex_index as usize];
        let end = self.vertex_offset[vertex_index as usize + 1];
        &self.adj_vertices[start..end]
    }

    /// edges sharing an endpoint with `edge_index`, excluding itself
    pub fn edges_touching_edge(&self, edge_index: EdgeIndex) -> Vec<EdgeIndex> {
        let (u, v) = self.vertices_of_edge(edge_index);
        let mut neighbors = Vec::with_capacity(
            self.edges_touching_vertex(u).len() + self.edges_touching_vertex(v).len() - 2,
        );
        for &endpoint in [u, v].iter() {
            for &neighbor_edge in self.edges_touching_vertex(endpoint).iter() {
                if neighbor_edge != edge_index {
                    neighbors.push(neighbor_edge);
                }
            }
        }
        neighbors
    }

    /// starting offset of a vertex's half-edges in the flat adjacency
    #[allow(clippy::unnecessary_cast)]
    pub fn local_edge_stride(&self, vertex_index: VertexIndex) -> usize {
        self.vertex_offset[vertex_index as usize]
    }

    pub fn global_edge_from_local(&self, local_edge: usize) -> EdgeIndex {
        self.adj_edges[local_edge]
    }

    /// the half-edge of `edge_index` on the given side: side 0 is the first
    /// endpoint of the edge, side 1 the second
    #[allow(clippy::unnecessary_cast)]
    pub fn local_edge_from_global(&self, edge_index: EdgeIndex, side: usize) -> usize {
        self.edge_local_slots[edge_index as usize][side]
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn is_vertex_on_boundary(&self, vertex_index: VertexIndex) -> bool {
        self.vertex_on_boundary[vertex_index as usize]
    }

    pub fn vertex_on_boundary(&self) -> &[bool] {
        &self.vertex_on_boundary
    }

    /// undirected lookup of the edge between two vertices
    pub fn edge_from_vertex_pair(&self, u: VertexIndex, v: VertexIndex) -> Option<EdgeIndex> {
        let key = if u < v { (u, v) } else { (v, u) };
        self.edge_lookup.get(&key).copied()
    }

    /// the largest vertex degree, used to size the boundary arena rows
    #[allow(clippy::unnecessary_cast)]
    pub fn max_degree(&self) -> usize {
        (0..self.num_vertices())
            .map(|vertex_index| self.edges_touching_vertex(vertex_index as VertexIndex).len())
            .max()
            .unwrap_or(0)
    }

    pub fn initializer(&self) -> GraphInitializer {
        GraphInitializer::new(self.vertex_num, self.edges.clone(), self.vertex_on_boundary.clone())
    }
}

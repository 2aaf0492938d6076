//! Peeling Decoder
//!
//! Linear-time back-sweep over the spanning forest of fully-grown edges. The
//! forest edges are visited in reverse discovery order, which guarantees the
//! chosen endpoint is a leaf of the residual forest: flipping the edge there
//! annihilates the leaf's syndrome bit and pushes the parity toward the
//! interior, or into an open-boundary vertex that absorbs it.
//!

use crate::decoding_graph::*;
use crate::spanning_forest::*;
use crate::util::*;

pub struct PeelingDecoder;

impl PeelingDecoder {
    /// build the spanning forest of the masked edges and peel it; the seeded
    /// forest is used whenever boundary vertices were absorbed during growth
    pub fn decode(
        graph: &DecodingGraph,
        syndrome: &mut [bool],
        edge_mask: &[bool],
        seeds: &[bool],
        num_seeds: usize,
    ) -> Vec<bool> {
        let (forest_edges, mut degree_in_forest) = if num_seeds == 0 {
            spanning_forest(graph, edge_mask)
        } else {
            spanning_forest_seeded(graph, edge_mask, seeds, num_seeds)
        };
        Self::peel_forest(graph, syndrome, &forest_edges, &mut degree_in_forest)
    }

    /// reverse-order traversal turning syndrome bits into edge selections
    #[allow(clippy::unnecessary_cast)]
    pub fn peel_forest(
        graph: &DecodingGraph,
        syndrome: &mut [bool],
        forest_edges: &[EdgeIndex],
        degree_in_forest: &mut [usize],
    ) -> Vec<bool> {
        let mut error_edges = vec![false; graph.num_edges()];
        for &edge_index in forest_edges.iter().rev() {
            let (a, b) = graph.vertices_of_edge(edge_index);
            // the leaf endpoint of the residual forest gets peeled; an
            // open-boundary vertex never does, it only absorbs parity
            let swap_leaf = degree_in_forest[a as usize] != 1 || graph.is_vertex_on_boundary(a);
            let (leaf, interior) = if swap_leaf { (b, a) } else { (a, b) };

            degree_in_forest[leaf as usize] -= 1;
            degree_in_forest[interior as usize] -= 1;

            if syndrome[leaf as usize] {
                error_edges[edge_index as usize] = true;
                syndrome[leaf as usize] = false;
                syndrome[interior as usize] = !syndrome[interior as usize];
            }
        }
        error_edges
    }
}

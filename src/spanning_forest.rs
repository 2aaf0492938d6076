//! Spanning Forest
//!
//! Depth-first construction of a spanning forest restricted to a boolean edge
//! subset (typically the fully-grown edges after syndrome validation). The
//! traversal walks the graph's flat adjacency directly and records each tree
//! edge in discovery order together with per-vertex degrees inside the forest.
//! Erasure chains can be long, so the DFS runs on an explicit vector-backed
//! stack instead of the call stack.
//!
//! The seeded variant roots trees at the given seed vertices first and never
//! walks a seed-to-seed edge, so that seeds end up as degree-1-or-less
//! attachment points and the peeling sweep can drain parity into them. A seed
//! without any masked incident edge still becomes a visited, degree-0 root.
//!

use crate::decoding_graph::*;
use crate::util::*;

/// tree edges in discovery order plus the degree of every vertex within the
/// forest
pub type SpanningForest = (Vec<EdgeIndex>, Vec<usize>);

#[allow(clippy::unnecessary_cast)]
fn grow_tree(
    graph: &DecodingGraph,
    edge_mask: &[bool],
    visited: &mut [bool],
    forest_edges: &mut Vec<EdgeIndex>,
    degree_in_forest: &mut [usize],
    tree_root: VertexIndex,
    seeds: Option<&[bool]>,
) {
    visited[tree_root as usize] = true;
    // (vertex, next adjacency slot to inspect)
    let mut stack: Vec<(VertexIndex, usize)> = vec![(tree_root, 0)];
    while let Some(&(vertex_index, slot)) = stack.last() {
        let edge_indices = graph.edges_touching_vertex(vertex_index);
        let vertex_indices = graph.vertices_touching_vertex(vertex_index);
        let mut descended = false;
        for local_slot in slot..edge_indices.len() {
            let edge_index = edge_indices[local_slot];
            let neighbor = vertex_indices[local_slot];
            let neighbor_is_seed = seeds.map_or(false, |seeds| seeds[neighbor as usize]);
            if edge_mask[edge_index as usize] && !visited[neighbor as usize] && !neighbor_is_seed {
                forest_edges.push(edge_index);
                degree_in_forest[vertex_index as usize] += 1;
                degree_in_forest[neighbor as usize] += 1;
                visited[neighbor as usize] = true;
                stack.last_mut().unwrap().1 = local_slot + 1;
                stack.push((neighbor, 0));
                descended = true;
                break;
            }
        }
        if !descended {
            stack.pop();
        }
    }
}

/// spanning forest of the masked subgraph, rooting a tree at the first
/// unvisited endpoint of each masked edge
#[allow(clippy::unnecessary_cast)]
pub fn spanning_forest(graph: &DecodingGraph, edge_mask: &[bool]) -> SpanningForest {
    let num_vertices = graph.num_vertices();
    let mut visited = vec![false; num_vertices];
    let mut degree_in_forest = vec![0; num_vertices];
    let mut forest_edges = Vec::new();
    for edge_index in 0..edge_mask.len() {
        if !edge_mask[edge_index] {
            continue;
        }
        let (u, v) = graph.vertices_of_edge(edge_index as EdgeIndex);
        if !visited[u as usize] {
            grow_tree(graph, edge_mask, &mut visited, &mut forest_edges, &mut degree_in_forest, u, None);
        }
        if !visited[v as usize] {
            grow_tree(graph, edge_mask, &mut visited, &mut forest_edges, &mut degree_in_forest, v, None);
        }
    }
    (forest_edges, degree_in_forest)
}

/// spanning forest whose trees are rooted at the seed vertices first;
/// seed-to-seed edges are never recorded
#[allow(clippy::unnecessary_cast)]
pub fn spanning_forest_seeded(
    graph: &DecodingGraph,
    edge_mask: &[bool],
    seeds: &[bool],
    num_seeds: usize,
) -> SpanningForest {
    let num_vertices = graph.num_vertices();
    let mut visited = vec![false; num_vertices];
    let mut degree_in_forest = vec![0; num_vertices];
    let mut forest_edges = Vec::new();
    if num_seeds != 0 {
        for (vertex_index, &is_seed) in seeds.iter().enumerate() {
            if is_seed && !visited[vertex_index] {
                grow_tree(
                    graph,
                    edge_mask,
                    &mut visited,
                    &mut forest_edges,
                    &mut degree_in_forest,
                    vertex_index as VertexIndex,
                    Some(seeds),
                );
            }
        }
    }
    for edge_index in 0..edge_mask.len() {
        if !edge_mask[edge_index] {
            continue;
        }
        let (u, v) = graph.vertices_of_edge(edge_index as EdgeIndex);
        if !visited[u as usize] {
            grow_tree(graph, edge_mask, &mut visited, &mut forest_edges, &mut degree_in_forest, u, Some(seeds));
        }
        if !visited[v as usize] {
            grow_tree(graph, edge_mask, &mut visited, &mut forest_edges, &mut degree_in_forest, v, Some(seeds));
        }
    }
    (forest_edges, degree_in_forest)
}

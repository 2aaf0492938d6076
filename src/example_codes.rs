//! Example Decoding Graphs
//!
//! Code-capacity decoding graphs and randomized error sampling used by the
//! test suite and by benchmarks. Lattice construction and noise models are
//! collaborators of the decoder core, not part of it: everything here talks
//! to the decoder exclusively through [`GraphInitializer`] and dense
//! syndrome/erasure bit vectors.
//!

use crate::decoding_graph::*;
use crate::rand_xoshiro::rand_core::SeedableRng;
use crate::util::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// Vertex corresponds to a stabilizer measurement bit
#[derive(Debug, Clone)]
pub struct CodeVertex {
    /// neighbor edges helps to set find individual edge
    pub neighbor_edges: Vec<EdgeIndex>,
    /// whether it sits on the open boundary of the code
    pub is_boundary: bool,
    /// whether it's a defect
    pub is_defect: bool,
}

/// Edge flips the measurement result of its two vertices
#[derive(Debug, Clone)]
pub struct CodeEdge {
    /// the two vertices incident to this edge
    pub vertices: (VertexIndex, VertexIndex),
    /// probability of flipping the results of the two vertices; do not set p
    /// to 0 to remove an edge: create a new code type without it instead
    pub p: f64,
    /// probability of having a reported event of error on this edge
    /// (aka erasure errors)
    pub pe: f64,
    /// whether this edge is erased
    pub is_erasure: bool,
}

impl CodeEdge {
    pub fn new(u: VertexIndex, v: VertexIndex) -> Self {
        Self {
            vertices: (u, v),
            p: 0.,
            pe: 0.,
            is_erasure: false,
        }
    }
}

pub trait ExampleCode {
    /// get mutable references to vertices and edges
    fn vertices_edges(&mut self) -> (&mut Vec<CodeVertex>, &mut Vec<CodeEdge>);
    fn immutable_vertices_edges(&self) -> (&Vec<CodeVertex>, &Vec<CodeEdge>);

    /// get the number of vertices
    fn vertex_num(&self) -> usize {
        self.immutable_vertices_edges().0.len()
    }

    /// get the number of edges
    fn edge_num(&self) -> usize {
        self.immutable_vertices_edges().1.len()
    }

    /// set probability of all edges; user can set individual probabilities
    fn set_probability(&mut self, p: f64) {
        let (_vertices, edges) = self.vertices_edges();
        for edge in edges.iter_mut() {
            edge.p = p;
        }
    }

    /// set erasure probability of all edges; user can set individual probabilities
    fn set_erasure_probability(&mut self, pe: f64) {
        let (_vertices, edges) = self.vertices_edges();
        for edge in edges.iter_mut() {
            edge.pe = pe;
        }
    }

    /// automatically create vertices given edges
    #[allow(clippy::unnecessary_cast)]
    fn fill_vertices(&mut self, vertex_num: usize) {
        let (vertices, edges) = self.vertices_edges();
        vertices.clear();
        vertices.reserve(vertex_num);
        for _ in 0..vertex_num {
            vertices.push(CodeVertex {
                neighbor_edges: Vec::new(),
                is_boundary: false,
                is_defect: false,
            });
        }
        for (edge_index, edge) in edges.iter().enumerate() {
            let (u, v) = edge.vertices;
            vertices[u as usize].neighbor_edges.push(edge_index as EdgeIndex);
            vertices[v as usize].neighbor_edges.push(edge_index as EdgeIndex);
        }
    }

    /// mark the open-boundary vertices
    #[allow(clippy::unnecessary_cast)]
    fn set_boundary_vertices(&mut self, boundary_vertices: &[VertexIndex]) {
        let (vertices, _edges) = self.vertices_edges();
        for &vertex_index in boundary_vertices.iter() {
            vertices[vertex_index as usize].is_boundary = true;
        }
    }

    /// sanity check to avoid duplicate edges that are hard to debug
    fn sanity_check(&self) -> Result<(), String> {
        let (vertices, edges) = self.immutable_vertices_edges();
        if vertices.is_empty() || edges.is_empty() {
            return Err("empty graph".to_string());
        }
        let mut existing_edges = std::collections::HashMap::<(VertexIndex, VertexIndex), usize>::new();
        for (edge_index, edge) in edges.iter().enumerate() {
            let (u, v) = edge.vertices;
            if u == v {
                return Err(format!("edge {} is a self-loop on vertex {}", edge_index, u));
            }
            let key = if u < v { (u, v) } else { (v, u) };
            if let Some(&previous_index) = existing_edges.get(&key) {
                return Err(format!(
                    "duplicate edge {} and {} with incident vertices {:?}",
                    previous_index, edge_index, key
                ));
            }
            existing_edges.insert(key, edge_index);
        }
        for (vertex_index, vertex) in vertices.iter().enumerate() {
            if vertex.neighbor_edges.is_empty() {
                return Err(format!("vertex {} do not have any neighbor edges", vertex_index));
            }
        }
        Ok(())
    }

    /// generate standard interface to instantiate a union-find decoder
    #[allow(clippy::unnecessary_cast)]
    fn get_initializer(&self) -> GraphInitializer {
        let (vertices, edges) = self.immutable_vertices_edges();
        let vertex_num = vertices.len() as VertexNum;
        let edge_pairs = edges.iter().map(|edge| edge.vertices).collect();
        let vertex_on_boundary = vertices.iter().map(|vertex| vertex.is_boundary).collect();
        GraphInitializer::new(vertex_num, edge_pairs, vertex_on_boundary)
    }

    /// set defect vertices (non-trivial measurement result in case of single
    /// round of measurement)
    #[allow(clippy::unnecessary_cast)]
    fn set_defect_vertices(&mut self, defect_vertices: &[VertexIndex]) {
        let (vertices, _edges) = self.vertices_edges();
        for vertex in vertices.iter_mut() {
            vertex.is_defect = false;
        }
        for &vertex_index in defect_vertices.iter() {
            vertices[vertex_index as usize].is_defect = true;
        }
    }

    /// get current defect vertices
    #[allow(clippy::unnecessary_cast)]
    fn get_defect_vertices(&self) -> Vec<VertexIndex> {
        let (vertices, _edges) = self.immutable_vertices_edges();
        vertices
            .iter()
            .enumerate()
            .filter_map(|(vertex_index, vertex)| vertex.is_defect.then_some(vertex_index as VertexIndex))
            .collect()
    }

    /// generate random errors based on the edge probabilities and a seed for
    /// the pseudo number generator; erased edges flip with probability 1/2.
    /// Returns dense `(error, erasure)` bit vectors over the edges.
    fn generate_random_errors(&mut self, seed: u64) -> (Vec<bool>, Vec<bool>) {
        let mut rng = DeterministicRng::seed_from_u64(seed);
        let (_vertices, edges) = self.vertices_edges();
        let mut error = Vec::with_capacity(edges.len());
        let mut erasure = Vec::with_capacity(edges.len());
        for edge in edges.iter_mut() {
            let p = if rng.next_f64() < edge.pe {
                edge.is_erasure = true;
                0.5 // when erasure happens, there are 50% chance of error
            } else {
                edge.is_erasure = false;
                edge.p
            };
            error.push(rng.next_f64() < p);
            erasure.push(edge.is_erasure);
        }
        (error, erasure)
    }
}

/// measure the syndrome of an error pattern: a vertex reports a defect when
/// an odd number of its incident edges carry an error; open-boundary vertices
/// never report
#[allow(clippy::unnecessary_cast)]
pub fn measure_syndrome(graph: &DecodingGraph, error_edges: &[bool]) -> Vec<bool> {
    let mut syndrome = vec![false; graph.num_vertices()];
    for (vertex_index, syndrome_bit) in syndrome.iter_mut().enumerate() {
        if graph.is_vertex_on_boundary(vertex_index as VertexIndex) {
            continue;
        }
        let toggles = graph
            .edges_touching_vertex(vertex_index as VertexIndex)
            .iter()
            .filter(|&&edge_index| error_edges[edge_index as usize])
            .count();
        *syndrome_bit = toggles % 2 == 1;
    }
    syndrome
}

/// code capacity noise model is a single measurement round with perfect
/// stabilizer measurements; e.g. this is the decoding graph of a CSS surface
/// code with X-type stabilizers, the top and bottom rows being open-boundary
/// sinks
#[derive(Debug, Clone)]
pub struct CodeCapacityPlanarCode {
    /// vertices in the code
    pub vertices: Vec<CodeVertex>,
    /// nearest-neighbor edges in the decoding graph
    pub edges: Vec<CodeEdge>,
}

impl ExampleCode for CodeCapacityPlanarCode {
    fn vertices_edges(&mut self) -> (&mut Vec<CodeVertex>, &mut Vec<CodeEdge>) {
        (&mut self.vertices, &mut self.edges)
    }
    fn immutable_vertices_edges(&self) -> (&Vec<CodeVertex>, &Vec<CodeEdge>) {
        (&self.vertices, &self.edges)
    }
}

impl CodeCapacityPlanarCode {
    pub fn new(d: usize, p: f64) -> Self {
        let mut code = Self::create_code(d);
        code.set_probability(p);
        code
    }

    /// `d` columns of stabilizers, `d - 1` interior rows between two open
    /// rows; edges are emitted top row first, then per interior vertex its
    /// downward edge followed by its rightward edge
    #[allow(clippy::unnecessary_cast)]
    pub fn create_code(d: usize) -> Self {
        assert!(d >= 2, "d must be no less than 2");
        let vertex_num = d * (d + 1);
        let mut edges = Vec::new();
        for column in 0..d {
            edges.push(CodeEdge::new(column as VertexIndex, (d + column) as VertexIndex));
        }
        for row in 0..d - 1 {
            for column in 0..d {
                let vertex_index = d + row * d + column;
                edges.push(CodeEdge::new(
                    vertex_index as VertexIndex,
                    (vertex_index + d) as VertexIndex,
                ));
                if column + 1 < d {
                    edges.push(CodeEdge::new(
                        vertex_index as VertexIndex,
                        (vertex_index + 1) as VertexIndex,
                    ));
                }
            }
        }
        let mut code = Self {
            vertices: Vec::new(),
            edges,
        };
        code.fill_vertices(vertex_num);
        let boundary_vertices: Vec<VertexIndex> = (0..d)
            .map(|column| column as VertexIndex)
            .chain((vertex_num - d..vertex_num).map(|vertex_index| vertex_index as VertexIndex))
            .collect();
        code.set_boundary_vertices(&boundary_vertices);
        code
    }
}

/// periodic `d x d` lattice of stabilizers without any open boundary; the
/// total defect count is always even
#[derive(Debug, Clone)]
pub struct CodeCapacityToricCode {
    /// vertices in the code
    pub vertices: Vec<CodeVertex>,
    /// nearest-neighbor edges in the decoding graph
    pub edges: Vec<CodeEdge>,
}

impl ExampleCode for CodeCapacityToricCode {
    fn vertices_edges(&mut self) -> (&mut Vec<CodeVertex>, &mut Vec<CodeEdge>) {
        (&mut self.vertices, &mut self.edges)
    }
    fn immutable_vertices_edges(&self) -> (&Vec<CodeVertex>, &Vec<CodeEdge>) {
        (&self.vertices, &self.edges)
    }
}

impl CodeCapacityToricCode {
    pub fn new(d: usize, p: f64) -> Self {
        let mut code = Self::create_code(d);
        code.set_probability(p);
        code
    }

    /// per vertex in row-major order: the row-wrap edge first (leftmost
    /// column only), then right, then the column-wrap edge (top row only),
    /// then down. Requires `d >= 3`: at `d == 2` a wrap edge coincides with
    /// the plain neighbor edge and the lattice degenerates to double qubits.
    #[allow(clippy::unnecessary_cast)]
    pub fn create_code(d: usize) -> Self {
        assert!(d >= 3, "d must be no less than 3");
        let vertex_num = d * d;
        let mut edges = Vec::new();
        for row in 0..d {
            for column in 0..d {
                let vertex_index = row * d + column;
                if column == 0 {
                    edges.push(CodeEdge::new(
                        vertex_index as VertexIndex,
                        (vertex_index + d - 1) as VertexIndex,
                    ));
                }
                if column + 1 < d {
                    edges.push(CodeEdge::new(
                        vertex_index as VertexIndex,
                        (vertex_index + 1) as VertexIndex,
                    ));
                }
                if row == 0 {
                    edges.push(CodeEdge::new(
                        vertex_index as VertexIndex,
                        (vertex_index + (d - 1) * d) as VertexIndex,
                    ));
                }
                if row + 1 < d {
                    edges.push(CodeEdge::new(
                        vertex_index as VertexIndex,
                        (vertex_index + d) as VertexIndex,
                    ));
                }
            }
        }
        let mut code = Self {
            vertices: Vec::new(),
            edges,
        };
        code.fill_vertices(vertex_num);
        code
    }
}

/// writes a header, the graph initializer and then one JSON line per logged
/// syndrome pattern, so that decoding sessions can be replayed offline
pub struct ErrorPatternLogger {
    file: BufWriter<File>,
}

impl ErrorPatternLogger {
    pub fn new(path: &str, initializer: &GraphInitializer) -> io::Result<Self> {
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(b"Syndrome Pattern v1.0   <initializer> <syndrome_pattern>*\n")?;
        serde_json::to_writer(&mut file, initializer)?;
        file.write_all(b"\n")?;
        Ok(Self { file })
    }

    pub fn log(&mut self, syndrome_pattern: &SyndromePattern) -> io::Result<()> {
        serde_json::to_writer(&mut self.file, syndrome_pattern)?;
        self.file.write_all(b"\n")
    }
}

/// reads files produced by [`ErrorPatternLogger`]
pub struct ErrorPatternReader {
    pub initializer: GraphInitializer,
    pub syndrome_patterns: Vec<SyndromePattern>,
}

impl ErrorPatternReader {
    pub fn new(path: &str) -> io::Result<Self> {
        let mut lines = BufReader::new(File::open(path)?).lines();
        let header = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "empty file"))??;
        if !header.starts_with("Syndrome Pattern v1.0") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported header: {}", header),
            ));
        }
        let initializer_line = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "missing initializer"))??;
        let initializer: GraphInitializer = serde_json::from_str(&initializer_line)?;
        let mut syndrome_patterns = Vec::new();
        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            syndrome_patterns.push(serde_json::from_str(&line)?);
        }
        Ok(Self {
            initializer,
            syndrome_patterns,
        })
    }
}

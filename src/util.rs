use crate::rand_xoshiro::rand_core::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

cfg_if::cfg_if! {
    if #[cfg(feature="u32_index")] {
        pub type EdgeIndex = u32;
        pub type VertexIndex = u32;
    } else {
        pub type EdgeIndex = usize;
        pub type VertexIndex = usize;
    }
}

pub type VertexNum = VertexIndex;
pub type EdgeNum = EdgeIndex;

/// sentinel for "this vertex belongs to no cluster yet"
pub const NO_CLUSTER: VertexIndex = VertexIndex::MAX;

/// errors surfaced by graph construction and the decode entry points;
/// none of them are retried internally
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecoderError {
    /// duplicate edge, self-loop or endpoint out of range
    #[error("invalid decoding graph: {reason}")]
    InvalidGraph { reason: String },
    /// a caller-supplied buffer has the wrong length
    #[error("dimension mismatch of `{what}`: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// a growth increment is not a positive finite number
    #[error("invalid growth increment {value} for edge {edge_index}")]
    InvalidIncrement { edge_index: usize, value: f32 },
    /// a state the growth and peeling procedures cannot reach from a syndrome
    /// that was measured on a well-formed code
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

/// a sparse description of one decoding round: the vertices with non-trivial
/// measurement outcome and the edges reported as erased
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndromePattern {
    /// the vertices corresponding to defect measurements
    pub defect_vertices: Vec<VertexIndex>,
    /// the edges that experience erasures, i.e. known errors
    pub erasures: Vec<EdgeIndex>,
}

impl SyndromePattern {
    pub fn new(defect_vertices: Vec<VertexIndex>, erasures: Vec<EdgeIndex>) -> Self {
        Self {
            defect_vertices,
            erasures,
        }
    }

    pub fn new_vertices(defect_vertices: Vec<VertexIndex>) -> Self {
        Self::new(defect_vertices, vec![])
    }

    pub fn new_empty() -> Self {
        Self::new(vec![], vec![])
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn from_dense(syndrome: &[bool], erasure: &[bool]) -> Self {
        let defect_vertices = syndrome
            .iter()
            .enumerate()
            .filter_map(|(vertex_index, &is_defect)| is_defect.then_some(vertex_index as VertexIndex))
            .collect();
        let erasures = erasure
            .iter()
            .enumerate()
            .filter_map(|(edge_index, &is_erased)| is_erased.then_some(edge_index as EdgeIndex))
            .collect();
        Self::new(defect_vertices, erasures)
    }

    /// expand the defect vertices into a dense per-vertex bit vector
    #[allow(clippy::unnecessary_cast)]
    pub fn syndrome_vector(&self, vertex_num: usize) -> Vec<bool> {
        let mut syndrome = vec![false; vertex_num];
        for &vertex_index in self.defect_vertices.iter() {
            syndrome[vertex_index as usize] = true;
        }
        syndrome
    }

    /// expand the erasures into a dense per-edge bit vector
    #[allow(clippy::unnecessary_cast)]
    pub fn erasure_vector(&self, edge_num: usize) -> Vec<bool> {
        let mut erasure = vec![false; edge_num];
        for &edge_index in self.erasures.iter() {
            erasure[edge_index as usize] = true;
        }
        erasure
    }
}

/// elementwise XOR of two equal-length bit vectors
pub fn set_xor(a: &[bool], b: &[bool]) -> Vec<bool> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(&x, &y)| x ^ y).collect()
}

//! # Union-Find Decoder
//!
//! A weighted Union-Find decoder with erasure support for topological quantum
//! error-correcting codes. Given a decoding graph and a measured syndrome
//! (optionally with an erasure pattern), it produces an edge-level correction
//! that annihilates the syndrome: odd-parity clusters are grown in order of
//! size, fused on collision, and the spanning forest of fully-grown edges is
//! resolved by the peeling decoder.
//!

extern crate cfg_if;
extern crate derivative;
extern crate num_traits;
extern crate rand_xoshiro;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

pub mod cluster_boundary;
pub mod clusters;
pub mod decoding_graph;
pub mod example_codes;
pub mod ordered_float;
pub mod peeling_decoder;
pub mod spanning_forest;
pub mod union_find_decoder;
pub mod util;

pub use cluster_boundary::BoundaryStore;
pub use clusters::Clusters;
pub use decoding_graph::{DecodingGraph, GraphInitializer};
pub use peeling_decoder::PeelingDecoder;
pub use spanning_forest::{spanning_forest, spanning_forest_seeded};
pub use union_find_decoder::UnionFindDecoder;
pub use util::{DecoderError, EdgeIndex, SyndromePattern, VertexIndex};

//! Union-Find Decoder
//!
//! Orchestrates one decoding round: seed clusters from the syndrome (and
//! optionally an erasure pattern), repeatedly grow the smallest odd cluster
//! and fuse collisions until every cluster is even or boundary-absorbed, then
//! peel the spanning forest of fully-grown edges into an edge-level
//! correction.
//!
//! Delfosse, Nicolas, and Naomi H. Nickerson. "Almost-linear time decoding
//! algorithm for topological codes." Quantum 5 (2021): 595.
//!

use crate::clusters::*;
use crate::decoding_graph::*;
use crate::peeling_decoder::*;
use crate::util::*;
use derivative::Derivative;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct UnionFindDecoder {
    #[derivative(Debug = "ignore")]
    graph: Arc<DecodingGraph>,
    growth_increments: Option<Vec<f32>>,
    max_growth: f32,
    /// rebuilt at every decode, kept afterwards for inspection
    cluster_set: Clusters,
}

impl UnionFindDecoder {
    pub const DEFAULT_MAX_GROWTH: f32 = 2.0;

    /// the graph is preserved and shared immutably; increments default to 1
    /// per edge and are validated here
    pub fn new(
        graph: Arc<DecodingGraph>,
        growth_increments: Option<&[f32]>,
        max_growth: f32,
    ) -> Result<Self, DecoderError> {
        let empty_syndrome = vec![false; graph.num_vertices()];
        let cluster_set = Clusters::new(
            Arc::clone(&graph),
            &empty_syndrome,
            None,
            growth_increments,
            max_growth,
        )?;
        Ok(Self {
            graph,
            growth_increments: growth_increments.map(|increments| increments.to_vec()),
            max_growth,
            cluster_set,
        })
    }

    pub fn new_default(graph: Arc<DecodingGraph>) -> Result<Self, DecoderError> {
        Self::new(graph, None, Self::DEFAULT_MAX_GROWTH)
    }

    /// start a fresh decoding round from a syndrome alone
    pub fn set_syndrome(&mut self, syndrome: &[bool]) -> Result<(), DecoderError> {
        self.cluster_set = Clusters::new(
            Arc::clone(&self.graph),
            syndrome,
            None,
            self.growth_increments.as_deref(),
            self.max_growth,
        )?;
        Ok(())
    }

    /// start a fresh decoding round where the erasure pattern seeds the
    /// initially fully-grown edges
    pub fn set_syndrome_and_erasure(
        &mut self,
        syndrome: &[bool],
        erasure: &[bool],
    ) -> Result<(), DecoderError> {
        self.cluster_set = Clusters::new(
            Arc::clone(&self.graph),
            syndrome,
            Some(erasure),
            self.growth_increments.as_deref(),
            self.max_growth,
        )?;
        Ok(())
    }

    /// grow one cluster, fuse every edge collision it produced, then refresh
    /// the frontier and queue entry of every surviving root
    fn syndrome_validation_iteration(&mut self, cluster_id: VertexIndex) {
        let graph = Arc::clone(&self.graph);
        let cluster_set = &mut self.cluster_set;
        let edges_to_fuse = cluster_set.grow_cluster(cluster_id);
        let mut new_roots = BTreeSet::new();
        new_roots.insert(cluster_id);
        for edge_index in edges_to_fuse {
            let (u, v) = graph.vertices_of_edge(edge_index);
            let u_root = cluster_set.find_cluster_root(u);
            let v_root = cluster_set.find_cluster_root(v);
            debug_assert!(
                u_root.is_some() && v_root.is_some(),
                "both endpoints of a fused edge must be clustered"
            );
            if let (Some(u_root), Some(v_root)) = (u_root, v_root) {
                if u_root != v_root {
                    new_roots.insert(cluster_set.merge_clusters(u_root, v_root));
                }
            }
        }
        for &cluster_root in new_roots.iter() {
            cluster_set.check_boundary_vertices(cluster_root);
            cluster_set.add_to_grow_queue(cluster_root);
        }
        #[cfg(debug_assertions)]
        cluster_set.debug_check_invariants();
    }

    /// grow-and-fuse until no odd cluster remains; returns the number of
    /// iterations, which is bounded by `|E| * max_growth / min(increment)`
    pub fn syndrome_validation(&mut self) -> Result<usize, DecoderError> {
        let mut iterations = 0;
        while let Some(cluster_id) = self.cluster_set.smallest_odd_cluster() {
            if self.cluster_set.boundary().size(cluster_id) == 0 {
                // an odd cluster covering a whole graph component can absorb
                // nothing more; only a syndrome that was never measured on
                // this graph produces one
                return Err(DecoderError::InternalInvariant(format!(
                    "odd cluster {} has an empty frontier",
                    cluster_id
                )));
            }
            self.syndrome_validation_iteration(cluster_id);
            iterations += 1;
        }
        Ok(iterations)
    }

    #[allow(clippy::unnecessary_cast)]
    fn peel(&mut self, syndrome: &mut [bool]) -> Result<Vec<bool>, DecoderError> {
        let cluster_set = &self.cluster_set;
        let mut residual = cluster_set.syndrome().to_vec();
        let correction = PeelingDecoder::decode(
            self.graph.as_ref(),
            &mut residual,
            cluster_set.fully_grown_edges(),
            cluster_set.physical_boundary_vertices(),
            cluster_set.num_physical_boundary_vertices(),
        );
        for (vertex_index, &is_defect) in residual.iter().enumerate() {
            if is_defect && !self.graph.is_vertex_on_boundary(vertex_index as VertexIndex) {
                return Err(DecoderError::InternalInvariant(format!(
                    "peeling left an unmatched syndrome on vertex {}",
                    vertex_index
                )));
            }
        }
        // the caller's buffer is consumed only on success
        syndrome.fill(false);
        Ok(correction)
    }

    /// decode a syndrome; on success the syndrome is consumed (zeroed) and
    /// the returned vector marks the edges to flip
    pub fn decode(&mut self, syndrome: &mut [bool]) -> Result<Vec<bool>, DecoderError> {
        self.set_syndrome(syndrome)?;
        self.syndrome_validation()?;
        self.peel(syndrome)
    }

    /// decode a syndrome together with an erasure pattern that seeds the
    /// initially fully-grown edges
    pub fn decode_with_erasure(
        &mut self,
        syndrome: &mut [bool],
        erasure: &[bool],
    ) -> Result<Vec<bool>, DecoderError> {
        self.set_syndrome_and_erasure(syndrome, erasure)?;
        self.syndrome_validation()?;
        self.peel(syndrome)
    }

    /// the final fully-grown edges after validation, a superset of any
    /// supplied erasure
    pub fn modified_erasure(&self) -> &[bool] {
        self.cluster_set.fully_grown_edges()
    }

    pub fn cluster_set(&self) -> &Clusters {
        &self.cluster_set
    }

    pub fn graph(&self) -> &Arc<DecodingGraph> {
        &self.graph
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::example_codes::*;
    use more_asserts::assert_le;

    /// the distance-4 planar code layout used throughout the union-find
    /// decoding literature: 12 interior stabilizers, two open rows of 4
    pub fn planar_d4_graph() -> Arc<DecodingGraph> {
        let edges = vec![
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
            (4, 8),
            (4, 5),
            (5, 9),
            (5, 6),
            (6, 10),
            (6, 7),
            (7, 11),
            (8, 12),
            (8, 9),
            (9, 13),
            (9, 10),
            (10, 14),
            (10, 11),
            (11, 15),
            (12, 16),
            (12, 13),
            (13, 17),
            (13, 14),
            (14, 18),
            (14, 15),
            (15, 19),
        ];
        let mut vertex_on_boundary = vec![false; 20];
        for vertex_index in [0, 1, 2, 3, 16, 17, 18, 19] {
            vertex_on_boundary[vertex_index] = true;
        }
        Arc::new(DecodingGraph::new(20, edges, vertex_on_boundary).unwrap())
    }

    pub fn toric_l4_graph() -> Arc<DecodingGraph> {
        let edges = vec![
            (0, 3),
            (0, 1),
            (0, 12),
            (0, 4),
            (1, 2),
            (1, 13),
            (1, 5),
            (2, 3),
            (2, 14),
            (2, 6),
            (3, 15),
            (3, 7),
            (4, 7),
            (4, 5),
            (4, 8),
            (5, 6),
            (5, 9),
            (6, 7),
            (6, 10),
            (7, 11),
            (8, 11),
            (8, 9),
            (8, 12),
            (9, 10),
            (9, 13),
            (10, 11),
            (10, 14),
            (11, 15),
            (12, 15),
            (12, 13),
            (13, 14),
            (14, 15),
        ];
        Arc::new(DecodingGraph::new(16, edges, vec![false; 16]).unwrap())
    }

    fn assert_modified_erasure(
        graph: Arc<DecodingGraph>,
        defect_vertices: &[VertexIndex],
        expected_erased_edges: &[EdgeIndex],
    ) {
        let num_vertices = graph.num_vertices();
        let num_edges = graph.num_edges();
        let syndrome =
            SyndromePattern::new_vertices(defect_vertices.to_vec()).syndrome_vector(num_vertices);
        let expected = SyndromePattern::new(vec![], expected_erased_edges.to_vec()).erasure_vector(num_edges);
        let mut decoder = UnionFindDecoder::new_default(graph).unwrap();
        decoder.set_syndrome(&syndrome).unwrap();
        decoder.syndrome_validation().unwrap();
        assert_eq!(decoder.modified_erasure(), &expected);
    }

    #[test]
    fn union_find_decoder_planar_d4_case_1() {
        // cargo test union_find_decoder_planar_d4_case_1 -- --nocapture
        assert_modified_erasure(
            planar_d4_graph(),
            &[6, 8, 10, 12, 13],
            &[4, 8, 11, 12, 13, 18, 19, 20, 21],
        );
    }

    #[test]
    fn union_find_decoder_planar_d4_case_2() {
        // cargo test union_find_decoder_planar_d4_case_2 -- --nocapture
        assert_modified_erasure(
            planar_d4_graph(),
            &[4, 5, 8, 9, 10, 11, 14],
            &[0, 1, 4, 5, 6, 7, 8, 10, 11, 12, 13, 14, 15, 16, 17, 21, 22, 23],
        );
    }

    #[test]
    fn union_find_decoder_planar_d4_case_3() {
        // cargo test union_find_decoder_planar_d4_case_3 -- --nocapture
        assert_modified_erasure(
            planar_d4_graph(),
            &[5, 6, 10, 14, 15],
            &[1, 2, 5, 6, 7, 8, 9, 14, 15, 16, 17, 21, 22, 23, 24],
        );
    }

    #[test]
    fn union_find_decoder_toric_l4_case_1() {
        // cargo test union_find_decoder_toric_l4_case_1 -- --nocapture
        assert_modified_erasure(
            toric_l4_graph(),
            &[2, 3, 7, 8, 14, 15],
            &[7, 8, 10, 11, 12, 14, 19, 20, 21, 22, 27, 28, 31],
        );
    }

    #[test]
    fn union_find_decoder_toric_l4_case_2() {
        // cargo test union_find_decoder_toric_l4_case_2 -- --nocapture
        assert_modified_erasure(
            toric_l4_graph(),
            &[1, 4, 6, 7],
            &[1, 3, 4, 5, 6, 9, 11, 12, 13, 14, 15, 17, 18, 19],
        );
    }

    #[test]
    fn union_find_decoder_toric_l4_case_3() {
        // cargo test union_find_decoder_toric_l4_case_3 -- --nocapture
        assert_modified_erasure(
            toric_l4_graph(),
            &[0, 1, 5, 7, 10, 11, 12, 13],
            &[
                0, 1, 2, 3, 4, 5, 6, 11, 12, 13, 15, 16, 17, 18, 19, 20, 22, 23, 24, 25, 26, 27,
                28, 29, 30,
            ],
        );
    }

    #[test]
    fn union_find_decoder_toric_l4_corrects_recorded_error() {
        // cargo test union_find_decoder_toric_l4_corrects_recorded_error -- --nocapture
        let graph = toric_l4_graph();
        let error = SyndromePattern::new(vec![], vec![8, 11, 20, 27]).erasure_vector(graph.num_edges());
        let mut syndrome = measure_syndrome(&graph, &error);
        assert_eq!(
            syndrome,
            SyndromePattern::new_vertices(vec![2, 3, 7, 8, 14, 15]).syndrome_vector(16)
        );
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        let correction = decoder.decode(&mut syndrome).unwrap();
        let residual_error = set_xor(&error, &correction);
        assert!(measure_syndrome(&graph, &residual_error).iter().all(|&bit| !bit));
        assert!(syndrome.iter().all(|&bit| !bit));
    }

    #[test]
    fn union_find_decoder_planar_single_pair() {
        // cargo test union_find_decoder_planar_single_pair -- --nocapture
        // a lone syndrome pair on a distance-4 planar code grows exactly its
        // shared edge
        let code = CodeCapacityPlanarCode::create_code(4);
        let graph = Arc::new(DecodingGraph::from_initializer(&code.get_initializer()).unwrap());
        let syndrome_pair = graph.vertices_of_edge(5);
        let syndrome = SyndromePattern::new_vertices(vec![syndrome_pair.0, syndrome_pair.1])
            .syndrome_vector(graph.num_vertices());
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        decoder.set_syndrome(&syndrome).unwrap();
        decoder.syndrome_validation().unwrap();
        let mut expected = vec![false; graph.num_edges()];
        expected[5] = true;
        assert_eq!(decoder.modified_erasure(), &expected);
    }

    #[test]
    fn union_find_decoder_toric_l5_random_trials() {
        // cargo test union_find_decoder_toric_l5_random_trials -- --nocapture
        let num_trials: u64 = 1000;
        let mut code = CodeCapacityToricCode::new(5, 0.099);
        let graph = Arc::new(DecodingGraph::from_initializer(&code.get_initializer()).unwrap());
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        for trial in 0..num_trials {
            let (error, _erasure) = code.generate_random_errors(12344 + 2000 * trial);
            let mut syndrome = measure_syndrome(&graph, &error);
            let correction = decoder.decode(&mut syndrome).unwrap();
            let residual_error = set_xor(&error, &correction);
            let residual_syndrome = measure_syndrome(&graph, &residual_error);
            assert!(
                residual_syndrome.iter().all(|&bit| !bit),
                "uncorrected syndrome in trial {}",
                trial
            );
        }
    }

    #[test]
    fn union_find_decoder_toric_l5_erasure_trials() {
        // cargo test union_find_decoder_toric_l5_erasure_trials -- --nocapture
        let num_trials: u64 = 1000;
        let mut code = CodeCapacityToricCode::new(5, 0.1);
        code.set_erasure_probability(0.1);
        let graph = Arc::new(DecodingGraph::from_initializer(&code.get_initializer()).unwrap());
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        for trial in 0..num_trials {
            let (error, erasure) = code.generate_random_errors(33344 + 3000 * trial);
            let mut syndrome = measure_syndrome(&graph, &error);

            // before any growth the modified erasure is the erasure itself
            decoder.set_syndrome_and_erasure(&syndrome, &erasure).unwrap();
            assert_eq!(decoder.modified_erasure(), &erasure);

            let correction = decoder.decode_with_erasure(&mut syndrome, &erasure).unwrap();
            let residual_error = set_xor(&error, &correction);
            let residual_syndrome = measure_syndrome(&graph, &residual_error);
            assert!(
                residual_syndrome.iter().all(|&bit| !bit),
                "uncorrected syndrome in trial {}",
                trial
            );
            // the erasure only ever grows
            for (edge_index, &was_erased) in erasure.iter().enumerate() {
                if was_erased {
                    assert!(decoder.modified_erasure()[edge_index]);
                }
            }
        }
    }

    #[test]
    fn union_find_decoder_zero_syndrome() {
        // cargo test union_find_decoder_zero_syndrome -- --nocapture
        let graph = planar_d4_graph();
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        let mut syndrome = vec![false; graph.num_vertices()];
        let correction = decoder.decode(&mut syndrome).unwrap();
        assert_eq!(correction, vec![false; graph.num_edges()]);
        assert_eq!(decoder.modified_erasure(), &vec![false; graph.num_edges()]);
    }

    #[test]
    fn union_find_decoder_deterministic_output() {
        // cargo test union_find_decoder_deterministic_output -- --nocapture
        let mut code = CodeCapacityToricCode::new(5, 0.099);
        let graph = Arc::new(DecodingGraph::from_initializer(&code.get_initializer()).unwrap());
        for trial in 0..20u64 {
            let (error, _erasure) = code.generate_random_errors(7000 + trial);
            let syndrome = measure_syndrome(&graph, &error);
            let mut decoder_1 = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
            let mut decoder_2 = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
            let mut syndrome_1 = syndrome.clone();
            let mut syndrome_2 = syndrome.clone();
            let correction_1 = decoder_1.decode(&mut syndrome_1).unwrap();
            let correction_2 = decoder_2.decode(&mut syndrome_2).unwrap();
            assert_eq!(correction_1, correction_2);
            // reusing a decoder does not change the answer either
            let mut syndrome_3 = syndrome.clone();
            let correction_3 = decoder_1.decode(&mut syndrome_3).unwrap();
            assert_eq!(correction_1, correction_3);
        }
    }

    #[test]
    fn union_find_decoder_validation_iterations_bounded() {
        // cargo test union_find_decoder_validation_iterations_bounded -- --nocapture
        let mut code = CodeCapacityToricCode::new(5, 0.099);
        let graph = Arc::new(DecodingGraph::from_initializer(&code.get_initializer()).unwrap());
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        // every iteration applies at least one unit increment to some edge,
        // so the loop cannot outlast the total growth capacity
        let iteration_bound =
            (graph.num_edges() as f32 * UnionFindDecoder::DEFAULT_MAX_GROWTH).ceil() as usize;
        for trial in 0..100u64 {
            let (error, _erasure) = code.generate_random_errors(90210 + trial);
            let syndrome = measure_syndrome(&graph, &error);
            decoder.set_syndrome(&syndrome).unwrap();
            let iterations = decoder.syndrome_validation().unwrap();
            assert_le!(iterations, iteration_bound);
        }
    }

    #[test]
    fn union_find_decoder_rejects_wrong_dimensions() {
        // cargo test union_find_decoder_rejects_wrong_dimensions -- --nocapture
        let graph = planar_d4_graph();
        let mut decoder = UnionFindDecoder::new_default(Arc::clone(&graph)).unwrap();
        let mut short_syndrome = vec![false; graph.num_vertices() - 1];
        assert!(matches!(
            decoder.decode(&mut short_syndrome),
            Err(DecoderError::DimensionMismatch { what: "syndrome", .. })
        ));
        let mut syndrome = vec![false; graph.num_vertices()];
        let short_erasure = vec![false; graph.num_edges() - 1];
        assert!(matches!(
            decoder.decode_with_erasure(&mut syndrome, &short_erasure),
            Err(DecoderError::DimensionMismatch { what: "erasure", .. })
        ));
        assert!(matches!(
            UnionFindDecoder::new(Arc::clone(&graph), Some(&[f32::NAN; 25]), 2.0),
            Err(DecoderError::InvalidIncrement { .. })
        ));
    }

    #[test]
    fn union_find_decoder_weighted_growth() {
        // cargo test union_find_decoder_weighted_growth -- --nocapture
        // a heavier increment makes the weighted edge reach full growth in a
        // single pass while unit edges need two
        let graph = Arc::new(
            DecodingGraph::new(3, vec![(0, 1), (1, 2)], vec![true, false, true]).unwrap(),
        );
        let increments = vec![2., 0.5];
        let mut decoder = UnionFindDecoder::new(Arc::clone(&graph), Some(&increments), 2.0).unwrap();
        let mut syndrome = vec![false, true, false];
        let correction = decoder.decode(&mut syndrome).unwrap();
        assert_eq!(correction, vec![true, false]);
    }
}

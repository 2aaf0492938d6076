//! Cluster Boundary Store
//!
//! Compact per-cluster sets of frontier vertices. Every active cluster owns
//! one row inside a single flat arena; removals write a sentinel instead of
//! shifting, so that iteration during growth stays index-stable, and a later
//! [`BoundaryStore::defragment`] compacts the row. Rows start at the graph's
//! maximum degree and are relocated with doubled capacity when they fill up,
//! which keeps the arena proportional to the number of appended entries
//! instead of a worst-case quadratic pre-allocation.
//!

use crate::util::*;

/// sentinel of a removed row slot
pub const VACANT: VertexIndex = VertexIndex::MAX;

const NO_ROW: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct BoundaryRow {
    start: usize,
    len: usize,
    capacity: usize,
}

#[derive(Debug, Clone)]
pub struct BoundaryStore {
    /// all rows live here, padded with [`VACANT`]
    arena: Vec<VertexIndex>,
    rows: Vec<BoundaryRow>,
    /// row handle of each cluster root, [`NO_ROW`] when absent
    row_of: Vec<usize>,
    /// capacity of a freshly allocated row
    initial_row_capacity: usize,
}

impl BoundaryStore {
    pub fn new(num_vertices: usize, initial_row_capacity: usize) -> Self {
        let initial_row_capacity = initial_row_capacity.max(1);
        Self {
            arena: Vec::with_capacity(num_vertices.min(1024) * initial_row_capacity),
            rows: Vec::new(),
            row_of: vec![NO_ROW; num_vertices],
            initial_row_capacity,
        }
    }

    /// allocate a row for a new cluster root
    #[allow(clippy::unnecessary_cast)]
    pub fn add_cluster(&mut self, cluster_root: VertexIndex) {
        debug_assert_eq!(self.row_of[cluster_root as usize], NO_ROW, "cluster already has a row");
        let start = self.arena.len();
        self.arena.resize(start + self.initial_row_capacity, VACANT);
        self.row_of[cluster_root as usize] = self.rows.len();
        self.rows.push(BoundaryRow {
            start,
            len: 0,
            capacity: self.initial_row_capacity,
        });
    }

    #[allow(clippy::unnecessary_cast)]
    fn row_index(&self, cluster_root: VertexIndex) -> usize {
        let row_index = self.row_of[cluster_root as usize];
        debug_assert_ne!(row_index, NO_ROW, "cluster {} has no boundary row", cluster_root);
        row_index
    }

    /// append a vertex to the cluster's row; O(1) amortized
    pub fn add(&mut self, cluster_root: VertexIndex, vertex_index: VertexIndex) {
        let row_index = self.row_index(cluster_root);
        let row = self.rows[row_index];
        if row.len == row.capacity {
            // relocate the row to the arena tail with doubled capacity
            let new_start = self.arena.len();
            self.arena.extend_from_within(row.start..row.start + row.len);
            self.arena.resize(new_start + row.capacity * 2, VACANT);
            self.rows[row_index] = BoundaryRow {
                start: new_start,
                len: row.len,
                capacity: row.capacity * 2,
            };
        }
        let row = &mut self.rows[row_index];
        self.arena[row.start + row.len] = vertex_index;
        row.len += 1;
    }

    /// write the sentinel at a slot without shifting the rest of the row
    pub fn remove(&mut self, cluster_root: VertexIndex, local_index: usize) {
        let row = self.rows[self.row_index(cluster_root)];
        debug_assert!(local_index < row.len);
        self.arena[row.start + local_index] = VACANT;
    }

    /// the vertex at a slot; [`VACANT`] when removed and not yet defragmented
    pub fn get(&self, cluster_root: VertexIndex, local_index: usize) -> VertexIndex {
        let row = self.rows[self.row_index(cluster_root)];
        debug_assert!(local_index < row.len);
        self.arena[row.start + local_index]
    }

    /// view of the cluster's row, sentinels included until defragmented
    pub fn get_boundary(&self, cluster_root: VertexIndex) -> &[VertexIndex] {
        let row = self.rows[self.row_index(cluster_root)];
        &self.arena[row.start..row.start + row.len]
    }

    /// current element count, counting sentinels until defragmented
    pub fn size(&self, cluster_root: VertexIndex) -> usize {
        self.rows[self.row_index(cluster_root)].len
    }

    pub fn contains(&self, cluster_root: VertexIndex, vertex_index: VertexIndex) -> bool {
        self.get_boundary(cluster_root).contains(&vertex_index)
    }

    /// compact the row in place, dropping every sentinel entry
    pub fn defragment(&mut self, cluster_root: VertexIndex) {
        let row_index = self.row_index(cluster_root);
        let row = self.rows[row_index];
        let mut next_position = 0;
        for local_index in 0..row.len {
            if self.arena[row.start + local_index] != VACANT {
                self.arena.swap(row.start + local_index, row.start + next_position);
                next_position += 1;
            }
        }
        for local_index in next_position..row.len {
            self.arena[row.start + local_index] = VACANT;
        }
        self.rows[row_index].len = next_position;
    }

    /// append every non-sentinel entry of `src`'s row to `dst`'s row
    pub fn merge(&mut self, dst: VertexIndex, src: VertexIndex) {
        let src_row = self.rows[self.row_index(src)];
        for local_index in 0..src_row.len {
            let vertex_index = self.arena[src_row.start + local_index];
            if vertex_index != VACANT {
                self.add(dst, vertex_index);
            }
        }
    }
}

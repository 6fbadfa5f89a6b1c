//! Constraint graph for addend assignment
//!
//! One graph is built per salt attempt and thrown away afterwards. Vertices
//! are hash buckets, edges are columns, and each edge carries the offset the
//! column must resolve to. Solving the graph means finding one addend per
//! vertex such that, for every edge `(v1, v2, weight)`:
//!
//! ```text
//! addend[v1] + addend[v2] == weight      (wrapping)
//! ```
//!
//! Each connected component is solved by fixing its first vertex to
//! [`ROOT_ADDEND`] and propagating `weight - addend` along a depth-first walk.
//! An edge whose endpoints are both already assigned must agree with the
//! walk; otherwise the salt produced an inconsistent cycle and the attempt is
//! rejected. See Czech, Havas and Majewski, "An optimal algorithm for
//! generating minimal perfect hash functions" (1992).
//!
//! ## Addend encoding
//!
//! [`UNASSIGNED`] (0) marks an untouched vertex. The root value has the high
//! bit set, and every addend derived from it is the root plus or minus an
//! alternating sum of offsets, which stays far below `2^(usize::BITS - 1)`.
//! An assigned vertex therefore never reads as 0.

use smallvec::SmallVec;

/// Addend of a vertex no column touches
pub const UNASSIGNED: usize = 0;

/// Addend given to the first vertex of every component
pub const ROOT_ADDEND: usize = 1 << (usize::BITS - 1);

#[derive(Debug, Clone, Copy)]
struct Edge {
    vertex: usize,
    weight: usize,
}

/// Per-attempt undirected multigraph over the vertex universe
#[derive(Debug)]
pub struct ConstraintGraph {
    adjacency: Vec<SmallVec<[Edge; 2]>>,
    edge_count: usize,
}

impl ConstraintGraph {
    /// Empty graph over `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        ConstraintGraph {
            adjacency: vec![SmallVec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add an undirected edge constraining `addend[v1] + addend[v2]` to `weight`
    pub fn add_edge(&mut self, v1: usize, v2: usize, weight: usize) {
        debug_assert_ne!(v1, v2);
        self.adjacency[v1].push(Edge { vertex: v2, weight });
        self.adjacency[v2].push(Edge { vertex: v1, weight });
        self.edge_count += 1;
    }

    /// Whether any edge touches `vertex`
    #[inline]
    pub fn has_edges(&self, vertex: usize) -> bool {
        !self.adjacency[vertex].is_empty()
    }

    /// Assign addends to every vertex that has an edge
    ///
    /// `addends` must have one slot per vertex, all [`UNASSIGNED`]. Returns
    /// false as soon as a component turns out inconsistent; `addends` is then
    /// partially filled and must be discarded.
    pub fn solve(&self, addends: &mut [usize]) -> bool {
        debug_assert_eq!(addends.len(), self.vertex_count());
        let mut stack = Vec::new();
        for root in 0..self.vertex_count() {
            if !self.has_edges(root) || addends[root] != UNASSIGNED {
                continue;
            }
            addends[root] = ROOT_ADDEND;
            if !self.fill_component(addends, root, &mut stack) {
                return false;
            }
        }
        true
    }

    /// Propagate addends through the component of `root`
    ///
    /// Iterative depth-first walk; the explicit stack never holds more than
    /// one entry per vertex of the component.
    fn fill_component(&self, addends: &mut [usize], root: usize, stack: &mut Vec<usize>) -> bool {
        stack.clear();
        stack.push(root);
        while let Some(vertex) = stack.pop() {
            let addend = addends[vertex];
            for edge in &self.adjacency[vertex] {
                let other = addends[edge.vertex];
                if other == UNASSIGNED {
                    addends[edge.vertex] = edge.weight.wrapping_sub(addend);
                    stack.push(edge.vertex);
                } else if addend.wrapping_add(other) != edge.weight {
                    return false;
                }
            }
        }
        true
    }
}

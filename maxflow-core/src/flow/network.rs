// Licensed under the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License. You may obtain
// a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations
// under the License.

use num_traits::Float;

use crate::error::FlowError;
use crate::table::{fold_word, FixedKey, FixedKeyTable};

/// Caller-chosen vertex identifier.
pub type VertexId = usize;

/// Largest size estimate the network passes on to its lookup tables.
/// Bigger networks still work, with longer bucket chains.
pub const MAX_SIZE_HINT: usize = 1 << 20;

/// Lookup key of an edge: its ordered `(from, to)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from: VertexId,
    pub to: VertexId,
}

impl FixedKey for EdgeKey {
    const WIDTH: usize = 2 * std::mem::size_of::<VertexId>();

    #[inline]
    fn fixed_hash(&self) -> u64 {
        fold_word(fold_word(0, self.from as u64), self.to as u64)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub(crate) id: VertexId,
    /// Outgoing edges by arena index. Detached edges leave a `None` slot.
    pub(crate) edges: Vec<Option<usize>>,
    pub(crate) degree: usize,
    /// Edge through which the last search reached this vertex.
    pub(crate) pred: Option<usize>,
}

impl Vertex {
    fn new(id: VertexId) -> Self {
        Vertex {
            id,
            edges: Vec::new(),
            degree: 0,
            pred: None,
        }
    }

    pub(crate) fn connect(&mut self, edge: usize) {
        self.edges.push(Some(edge));
        self.degree += 1;
    }

    pub(crate) fn disconnect(&mut self, edge: usize) -> bool {
        match self.edges.iter_mut().rev().find(|slot| **slot == Some(edge)) {
            Some(slot) => {
                *slot = None;
                self.degree -= 1;
                true
            }
            None => false,
        }
    }

    /// Drops vacated slots at the end of the adjacency list.
    pub(crate) fn trim(&mut self) {
        while let Some(None) = self.edges.last() {
            self.edges.pop();
        }
    }

    pub(crate) fn outgoing(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().flatten().copied()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Edge<F> {
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) capacity: F,
    pub(crate) flow: F,
    /// Paired residual edge, only set while a solve is running.
    pub(crate) reverse: Option<usize>,
}

impl<F: Float> Edge<F> {
    pub(crate) fn new(from: usize, to: usize, capacity: F) -> Self {
        Edge {
            from,
            to,
            capacity,
            flow: F::zero(),
            reverse: None,
        }
    }

    #[inline]
    pub(crate) fn residual(&self) -> F {
        self.capacity - self.flow
    }
}

/// Read-only view of an edge of a [`FlowNetwork`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEdge<F> {
    pub from: VertexId,
    pub to: VertexId,
    pub capacity: F,
    pub flow: F,
}

/// A directed network with capacities and flows on its edges.
///
/// Vertices are created on first reference by [`add_edge`](Self::add_edge).
/// At most one edge exists per ordered `(from, to)` pair. Vertices and edges
/// live in arenas owned by the network and are looked up through two
/// [`FixedKeyTable`]s sized from the estimates given to
/// [`with_capacity`](Self::with_capacity).
#[derive(Debug, Clone)]
pub struct FlowNetwork<F = f64> {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge<F>>,
    vertex_table: FixedKeyTable<VertexId, usize>,
    edge_table: FixedKeyTable<EdgeKey, usize>,
}

impl<F: Float> Default for FlowNetwork<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> FlowNetwork<F> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty network whose lookup tables are sized for about
    /// `vertices` vertices and `edges` edges.
    ///
    /// The estimates only pick the bucket counts of the tables and are capped
    /// at [`MAX_SIZE_HINT`]; the vertex and edge arenas grow as edges are
    /// added.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        FlowNetwork {
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_table: FixedKeyTable::new(vertices.min(MAX_SIZE_HINT)),
            edge_table: FixedKeyTable::new(edges.min(MAX_SIZE_HINT)),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_table.len()
    }

    /// Number of edges added through [`add_edge`](Self::add_edge).
    pub fn edge_count(&self) -> usize {
        self.edge_table.len()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex_table.contains_key(&id)
    }

    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_table.contains_key(&EdgeKey { from, to })
    }

    /// Adds an edge from `from` to `to`, creating either vertex if needed.
    ///
    /// Fails with [`FlowError::InvalidCapacity`] if `capacity` is negative or
    /// not finite and with [`FlowError::DuplicateEdge`] if the edge already
    /// exists. The network is unchanged on failure.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: F) -> Result<(), FlowError> {
        if !capacity.is_finite() || capacity < F::zero() {
            return Err(FlowError::InvalidCapacity {
                from,
                to,
                capacity: capacity.to_f64().unwrap_or(f64::NAN),
            });
        }

        let index = self.edges.len();
        self.edge_table
            .put(EdgeKey { from, to }, index)
            .map_err(|_| FlowError::DuplicateEdge { from, to })?;

        let tail = self.ensure_vertex(from);
        let head = self.ensure_vertex(to);
        self.edges.push(Edge::new(tail, head, capacity));
        self.vertices[tail].connect(index);
        Ok(())
    }

    fn ensure_vertex(&mut self, id: VertexId) -> usize {
        if let Some(&index) = self.vertex_table.get(&id) {
            return index;
        }
        let index = self.vertices.len();
        let inserted = self.vertex_table.put(id, index);
        debug_assert!(inserted.is_ok());
        self.vertices.push(Vertex::new(id));
        index
    }

    pub(crate) fn vertex_index(&self, id: VertexId) -> Option<usize> {
        self.vertex_table.get(&id).copied()
    }

    fn edge(&self, from: VertexId, to: VertexId) -> Result<&Edge<F>, FlowError> {
        self.edge_table
            .get(&EdgeKey { from, to })
            .map(|&index| &self.edges[index])
            .ok_or(FlowError::EdgeNotFound { from, to })
    }

    /// Flow currently carried by the edge `(from, to)`.
    pub fn flow(&self, from: VertexId, to: VertexId) -> Result<F, FlowError> {
        self.edge(from, to).map(|edge| edge.flow)
    }

    pub fn capacity(&self, from: VertexId, to: VertexId) -> Result<F, FlowError> {
        self.edge(from, to).map(|edge| edge.capacity)
    }

    /// Number of outgoing edges of vertex `id`.
    pub fn out_degree(&self, id: VertexId) -> Result<usize, FlowError> {
        self.vertex_index(id)
            .map(|index| self.vertices[index].degree)
            .ok_or(FlowError::VertexNotFound(id))
    }

    /// Sets the flow of every edge back to zero, keeping the topology.
    pub fn reset_flows(&mut self) {
        for edge in &mut self.edges {
            edge.flow = F::zero();
        }
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = FlowEdge<F>> + '_ {
        self.edges.iter().map(|edge| FlowEdge {
            from: self.vertices[edge.from].id,
            to: self.vertices[edge.to].id,
            capacity: edge.capacity,
            flow: edge.flow,
        })
    }
}

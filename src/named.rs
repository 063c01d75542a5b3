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

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap, IndexSet};
use maxflow_core::flow::{SolverConfig, VertexId};
use maxflow_core::FlowError;
use num_traits::Float;

use crate::error::GraphError;
use crate::flow::{maxflow_with, EdgeRecord};

/// A flow graph whose vertices are named by any hashable value.
///
/// Names are interned into vertex ids in order of first use; the source
/// always gets id `0`.
///
/// ```rust
/// use maxflow::FlowGraph;
///
/// let mut graph = FlowGraph::new("s", "t");
/// graph.add_edge("s", "a", 3.0)?;
/// graph.add_edge("a", "t", 2.0)?;
/// graph.add_edge("s", "t", 1.0)?;
///
/// assert_eq!(graph.calculate_max_flow()?, 3.0);
/// assert_eq!(graph.flow(&"a", &"t")?, 2.0);
/// # Ok::<(), maxflow::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FlowGraph<N, F = f64> {
    names: IndexSet<N>,
    edges: IndexMap<(VertexId, VertexId), EdgeRecord<F>>,
    config: SolverConfig,
}

impl<N, F> FlowGraph<N, F>
where
    N: Hash + Eq,
    F: Float,
{
    /// Creates a graph holding only the `source` and `sink` vertices.
    pub fn new(source: N, sink: N) -> Self {
        let mut names = IndexSet::new();
        let (source, _) = names.insert_full(source);
        let (sink, _) = names.insert_full(sink);
        FlowGraph {
            names,
            edges: IndexMap::new(),
            config: SolverConfig::new(source, sink),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn id_of<Q>(&self, name: &Q) -> Option<VertexId>
    where
        Q: ?Sized + Hash + Equivalent<N>,
    {
        self.names.get_index_of(name)
    }

    /// Adds an edge from `tail` to `head`. Unknown names become new vertices.
    ///
    /// Edges are only handed to a [`FlowNetwork`](maxflow_core::flow::FlowNetwork)
    /// when the flow is calculated, so bad capacities and duplicates are caught
    /// here, reported with the ids the names would have been given. The graph
    /// is unchanged on failure.
    pub fn add_edge(&mut self, tail: N, head: N, capacity: F) -> Result<(), GraphError> {
        let known_tail = self.id_of(&tail);
        let known_head = self.id_of(&head);
        let next = self.names.len();
        let from = known_tail.unwrap_or(next);
        let to = known_head.unwrap_or_else(|| {
            if head == tail {
                from
            } else {
                next + usize::from(known_tail.is_none())
            }
        });

        if !capacity.is_finite() || capacity < F::zero() {
            return Err(FlowError::InvalidCapacity {
                from,
                to,
                capacity: capacity.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }
        if self.edges.contains_key(&(from, to)) {
            return Err(FlowError::DuplicateEdge { from, to }.into());
        }

        self.names.insert(tail);
        self.names.insert(head);
        self.edges
            .insert((from, to), EdgeRecord::new(from, to, capacity));
        Ok(())
    }

    /// Computes the maximum flow from the source to the sink and returns its
    /// value. Query the flow of single edges with [`flow`](Self::flow)
    /// afterwards.
    pub fn calculate_max_flow(&mut self) -> Result<F, GraphError> {
        let mut records: Vec<EdgeRecord<F>> = self.edges.values().copied().collect();
        let total = maxflow_with(&mut records, self.names.len(), self.config)?;

        for (edge, record) in self.edges.values_mut().zip(records) {
            edge.flow = record.flow;
        }
        Ok(total)
    }

    /// Flow from `tail` to `head`, zero if the two vertices are not joined by
    /// an edge.
    pub fn flow<Q>(&self, tail: &Q, head: &Q) -> Result<F, GraphError>
    where
        Q: ?Sized + Hash + Equivalent<N>,
    {
        let from = self.id_of(tail).ok_or(GraphError::UnknownVertex)?;
        let to = self.id_of(head).ok_or(GraphError::UnknownVertex)?;
        Ok(self
            .edges
            .get(&(from, to))
            .map_or(F::zero(), |edge| edge.flow))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GraphError;
    use crate::named::FlowGraph;
    use maxflow_core::FlowError;

    #[test]
    fn test_named_vertices() {
        let mut graph: FlowGraph<String> = FlowGraph::new("s".to_string(), "t".to_string());
        graph.add_edge("s".into(), "x".into(), 4.0).unwrap();
        graph.add_edge("x".into(), "y".into(), 2.0).unwrap();
        graph.add_edge("y".into(), "t".into(), 5.0).unwrap();
        graph.add_edge("x".into(), "t".into(), 1.0).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.calculate_max_flow(), Ok(3.0));
        assert_eq!(graph.flow("x", "y"), Ok(2.0));
        assert_eq!(graph.flow("s", "x"), Ok(3.0));
    }

    #[test]
    fn test_missing_edge_between_known_vertices_has_zero_flow() {
        let mut graph = FlowGraph::new(0u8, 1u8);
        graph.add_edge(0, 1, 2.0).unwrap();
        graph.calculate_max_flow().unwrap();

        assert_eq!(graph.flow(&1u8, &0u8), Ok(0.0));
        assert_eq!(graph.flow(&0u8, &7u8), Err(GraphError::UnknownVertex));
    }

    #[test]
    fn test_sink_without_edges() {
        let mut graph = FlowGraph::new('s', 't');
        graph.add_edge('s', 'a', 2.0).unwrap();
        assert_eq!(graph.calculate_max_flow(), Ok(0.0));
        assert_eq!(graph.flow(&'s', &'t'), Ok(0.0));
    }

    #[test]
    fn test_rejected_edges_leave_graph_unchanged() {
        let mut graph = FlowGraph::new("s", "t");
        graph.add_edge("s", "t", 5.0).unwrap();

        assert_eq!(
            graph.add_edge("s", "t", 3.0),
            Err(GraphError::Flow(FlowError::DuplicateEdge { from: 0, to: 1 }))
        );
        assert_eq!(
            graph.add_edge("s", "z", -1.0),
            Err(GraphError::Flow(FlowError::InvalidCapacity {
                from: 0,
                to: 2,
                capacity: -1.0
            }))
        );
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.flow(&"s", &"z"), Err(GraphError::UnknownVertex));

        assert_eq!(graph.calculate_max_flow(), Ok(5.0));
        assert_eq!(graph.flow(&"s", &"t"), Ok(5.0));
    }

    #[test]
    fn test_rejected_edge_reports_ids_of_new_names() {
        let mut graph = FlowGraph::new("s", "t");
        assert_eq!(
            graph.add_edge("a", "b", f64::NAN).map_err(|err| match err {
                GraphError::Flow(FlowError::InvalidCapacity { from, to, .. }) => (from, to),
                other => panic!("unexpected error {other:?}"),
            }),
            Err((2, 3))
        );
        assert_eq!(graph.vertex_count(), 2);

        graph.add_edge("a", "b", 1.0).unwrap();
        graph.add_edge("c", "c", 1.0).unwrap();
        assert_eq!(
            graph.add_edge("c", "c", 2.0),
            Err(GraphError::Flow(FlowError::DuplicateEdge { from: 4, to: 4 }))
        );
        assert_eq!(graph.vertex_count(), 5);
    }

    #[test]
    fn test_recalculation_starts_from_scratch() {
        let mut graph = FlowGraph::new("s", "t");
        graph.add_edge("s", "a", 1.0).unwrap();
        graph.add_edge("a", "t", 1.0).unwrap();
        assert_eq!(graph.calculate_max_flow(), Ok(1.0));

        graph.add_edge("s", "t", 2.0).unwrap();
        assert_eq!(graph.calculate_max_flow(), Ok(3.0));
        assert_eq!(graph.flow(&"a", &"t"), Ok(1.0));
    }
}

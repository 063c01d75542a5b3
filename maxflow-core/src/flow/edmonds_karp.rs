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

use hashbrown::HashMap;
use num_traits::Float;
use petgraph::visit::{EdgeCount, EdgeRef, GraphBase, IntoEdgeReferences, NodeIndexable};

use super::{FlowNetwork, MaxFlowSolver, SolverConfig};
use crate::error::FlowError;

/// The return type for `edmonds_karp()`. It has two attributes, `value` and
/// `flow_edges`.
///
/// * `value` - the value of the maximum flow
/// * `flow_edges` - the flow on every edge of the graph, keyed by the
///     `(source, target)` pair of the edge.
pub struct MaxFlowReturn<G: GraphBase, F> {
    pub value: F,
    pub flow_edges: HashMap<(G::NodeId, G::NodeId), F>,
}

/// Computes a maximum flow from `source` to `sink` with the Edmonds-Karp
/// algorithm.
///
/// Arguments:
///
/// * `graph` - the directed graph to run the algorithm on. Node indices are
///     used as vertex ids and at most one edge may join an ordered pair of
///     nodes.
/// * `source` - the node flow leaves from
/// * `sink` - the node flow arrives at
/// * `capacity` - a callback returning the capacity of an edge. Errors are
///     passed through.
///
/// Fails with [`FlowError::InvalidCapacity`] for negative or non-finite
/// capacities and [`FlowError::DuplicateEdge`] for parallel edges.
///
/// # Example
/// ```rust
/// use maxflow_core::flow::edmonds_karp;
/// use maxflow_core::FlowError;
/// use petgraph::graph::{DiGraph, NodeIndex};
///
/// let graph = DiGraph::<(), f64>::from_edges(&[(0, 2, 3.0), (2, 1, 2.0), (0, 1, 1.5)]);
/// let res = edmonds_karp(&graph, NodeIndex::new(0), NodeIndex::new(1), |e| Ok::<_, FlowError>(*e.weight())).unwrap();
/// assert_eq!(res.value, 3.5);
/// ```
pub fn edmonds_karp<G, F, C, E>(
    graph: G,
    source: G::NodeId,
    sink: G::NodeId,
    mut capacity: C,
) -> Result<MaxFlowReturn<G, F>, E>
where
    G: IntoEdgeReferences + NodeIndexable + EdgeCount,
    G::NodeId: Eq + Hash,
    F: Float,
    C: FnMut(G::EdgeRef) -> Result<F, E>,
    E: From<FlowError>,
{
    let mut network = FlowNetwork::with_capacity(graph.node_bound(), graph.edge_count());
    let mut endpoints = Vec::with_capacity(graph.edge_count());

    for edge in graph.edge_references() {
        let cap = capacity(edge)?;
        network.add_edge(
            graph.to_index(edge.source()),
            graph.to_index(edge.target()),
            cap,
        )?;
        endpoints.push((edge.source(), edge.target()));
    }

    let config = SolverConfig::new(graph.to_index(source), graph.to_index(sink));
    let value = MaxFlowSolver::new(config).solve(&mut network);

    let flow_edges = endpoints
        .into_iter()
        .zip(network.edges())
        .map(|(pair, edge)| (pair, edge.flow))
        .collect();

    Ok(MaxFlowReturn { value, flow_edges })
}

#[cfg(test)]
mod tests {
    use crate::error::FlowError;
    use crate::flow::edmonds_karp;
    use petgraph::graph::{DiGraph, NodeIndex};
    use petgraph::stable_graph::StableDiGraph;
    use petgraph::visit::EdgeRef;

    #[test]
    fn test_papadimitriou_example() {
        // s = 0, a = 1, b = 2, t = 3
        let graph = DiGraph::<(), f64>::from_edges(&[
            (0, 1, 2.0),
            (0, 2, 1.0),
            (1, 2, 1.0),
            (1, 3, 1.0),
            (2, 3, 2.0),
        ]);
        let s = NodeIndex::new(0);
        let t = NodeIndex::new(3);

        let res = edmonds_karp(&graph, s, t, |e| Ok::<f64, FlowError>(*e.weight())).unwrap();
        assert_eq!(res.value, 3.0);
        assert_eq!(res.flow_edges.len(), 5);
        assert_eq!(res.flow_edges[&(s, NodeIndex::new(1))], 2.0);
        assert_eq!(res.flow_edges[&(NodeIndex::new(2), t)], 2.0);
    }

    #[test]
    fn test_parallel_edges_are_rejected() {
        let graph = DiGraph::<(), f64>::from_edges(&[(0, 1, 2.0), (0, 1, 1.0)]);
        let res = edmonds_karp(&graph, NodeIndex::new(0), NodeIndex::new(1), |e| {
            Ok::<f64, FlowError>(*e.weight())
        });
        assert_eq!(res.err(), Some(FlowError::DuplicateEdge { from: 0, to: 1 }));
    }

    #[test]
    fn test_capacity_callback_error_is_passed_through() {
        let graph = DiGraph::<(), f64>::from_edges(&[(0, 2, 2.0), (2, 1, -1.0)]);
        let res = edmonds_karp(&graph, NodeIndex::new(0), NodeIndex::new(1), |e| {
            if *e.weight() < 0.0 {
                Err(FlowError::VertexNotFound(e.target().index()))
            } else {
                Ok(*e.weight())
            }
        });
        assert_eq!(res.err(), Some(FlowError::VertexNotFound(1)));
    }

    #[test]
    fn test_stable_graph_with_removed_node() {
        let mut graph: StableDiGraph<(), f64> = StableDiGraph::new();
        let s = graph.add_node(());
        let gone = graph.add_node(());
        let a = graph.add_node(());
        let t = graph.add_node(());
        graph.add_edge(s, gone, 4.0);
        graph.add_edge(s, a, 2.0);
        graph.add_edge(a, t, 5.0);
        graph.remove_node(gone);

        let res = edmonds_karp(&graph, s, t, |e| Ok::<f64, FlowError>(*e.weight())).unwrap();
        assert_eq!(res.value, 2.0);
        assert_eq!(res.flow_edges[&(a, t)], 2.0);
    }
}

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

use log::debug;
use maxflow_core::flow::{FlowNetwork, MaxFlowSolver, SolverConfig, VertexId};
use maxflow_core::FlowError;
use num_traits::Float;
use rayon::prelude::*;

/// One edge of a flow problem. `flow` is ignored on input and holds the
/// optimal flow of the edge after [`maxflow`] returns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord<F = f64> {
    pub from: VertexId,
    pub to: VertexId,
    pub capacity: F,
    pub flow: F,
}

impl<F: Float> EdgeRecord<F> {
    pub fn new(from: VertexId, to: VertexId, capacity: F) -> Self {
        EdgeRecord {
            from,
            to,
            capacity,
            flow: F::zero(),
        }
    }
}

/// A self-contained flow problem for [`maxflow_many`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowProblem<F = f64> {
    pub edges: Vec<EdgeRecord<F>>,
    /// Size hint for the vertex lookup table.
    pub num_vertices: usize,
}

/// Computes the maximum flow from vertex `0` to vertex `1`.
///
/// Builds a network from `edges` in order, solves it, and writes the flow of
/// every edge back into its record. On error no record is modified.
///
/// ```rust
/// use maxflow::{maxflow, EdgeRecord};
///
/// let mut edges = vec![
///     EdgeRecord::new(0, 2, 10.0),
///     EdgeRecord::new(0, 3, 10.0),
///     EdgeRecord::new(2, 1, 10.0),
///     EdgeRecord::new(3, 1, 10.0),
/// ];
/// assert_eq!(maxflow(&mut edges, 4).unwrap(), 20.0);
/// assert!(edges.iter().all(|e| e.flow == e.capacity));
/// ```
pub fn maxflow<F: Float>(edges: &mut [EdgeRecord<F>], num_vertices: usize) -> Result<F, FlowError> {
    maxflow_with(edges, num_vertices, SolverConfig::default())
}

/// Like [`maxflow`], with the source and sink taken from `config`.
pub fn maxflow_with<F: Float>(
    edges: &mut [EdgeRecord<F>],
    num_vertices: usize,
    config: SolverConfig,
) -> Result<F, FlowError> {
    let mut network = FlowNetwork::with_capacity(num_vertices, edges.len());
    for record in edges.iter() {
        network.add_edge(record.from, record.to, record.capacity)?;
    }
    debug!(
        "built network of {} vertices from {} edge records",
        network.vertex_count(),
        edges.len()
    );

    let total = MaxFlowSolver::new(config).solve(&mut network);
    for record in edges.iter_mut() {
        record.flow = network.flow(record.from, record.to)?;
    }
    Ok(total)
}

/// Solves independent problems in parallel, one network per problem.
pub fn maxflow_many<F>(problems: &mut [FlowProblem<F>]) -> Vec<Result<F, FlowError>>
where
    F: Float + Send + Sync,
{
    problems
        .par_iter_mut()
        .map(|problem| maxflow(&mut problem.edges, problem.num_vertices))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::flow::{maxflow, maxflow_many, maxflow_with, EdgeRecord, FlowProblem};
    use maxflow_core::flow::SolverConfig;
    use maxflow_core::FlowError;

    fn records(edges: &[(usize, usize, f64)]) -> Vec<EdgeRecord> {
        edges
            .iter()
            .map(|&(from, to, capacity)| EdgeRecord::new(from, to, capacity))
            .collect()
    }

    #[test]
    fn test_flows_are_copied_back() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut edges = records(&[(0, 2, 10.0), (2, 1, 3.0), (0, 1, 1.0)]);
        edges[0].flow = 99.0;

        assert_eq!(maxflow(&mut edges, 3), Ok(4.0));
        let flows: Vec<f64> = edges.iter().map(|e| e.flow).collect();
        assert_eq!(flows, vec![3.0, 3.0, 1.0]);
    }

    #[test]
    fn test_no_path() {
        let mut edges = records(&[(0, 2, 5.0)]);
        assert_eq!(maxflow(&mut edges, 2), Ok(0.0));
        assert_eq!(edges[0].flow, 0.0);
    }

    #[test]
    fn test_duplicate_record_leaves_records_untouched() {
        let mut edges = records(&[(0, 1, 5.0), (0, 1, 3.0)]);
        edges[1].flow = 7.0;

        assert_eq!(
            maxflow(&mut edges, 2),
            Err(FlowError::DuplicateEdge { from: 0, to: 1 })
        );
        assert_eq!(edges[0].flow, 0.0);
        assert_eq!(edges[1].flow, 7.0);
    }

    #[test]
    fn test_vertex_hint_is_only_a_hint() {
        let mut edges: Vec<EdgeRecord> = (2..2000)
            .flat_map(|v| [EdgeRecord::new(0, v, 1.0), EdgeRecord::new(v, 1, 0.5)])
            .collect();
        assert_eq!(maxflow(&mut edges, 0), Ok(999.0));
    }

    #[test]
    fn test_huge_vertex_hint() {
        let mut edges = records(&[(0, 2, 4.0), (2, 1, 2.5)]);
        assert_eq!(maxflow(&mut edges, usize::MAX), Ok(2.5));
        assert_eq!(edges[1].flow, 2.5);
    }

    #[test]
    fn test_custom_endpoints() {
        let mut edges = records(&[(5, 6, 2.0), (6, 7, 2.0)]);
        assert_eq!(maxflow_with(&mut edges, 3, SolverConfig::new(5, 7)), Ok(2.0));
        assert_eq!(maxflow(&mut edges, 3), Ok(0.0));
    }

    #[test]
    fn test_many_problems() {
        let mut problems = vec![
            FlowProblem {
                edges: records(&[(0, 1, 5.0)]),
                num_vertices: 2,
            },
            FlowProblem {
                edges: records(&[(0, 2, 1.0), (0, 2, 1.0)]),
                num_vertices: 2,
            },
            FlowProblem {
                edges: records(&[(0, 2, 10.0), (0, 3, 10.0), (2, 1, 10.0), (3, 1, 10.0)]),
                num_vertices: 4,
            },
        ];

        let results = maxflow_many(&mut problems);
        assert_eq!(results[0], Ok(5.0));
        assert_eq!(results[1], Err(FlowError::DuplicateEdge { from: 0, to: 2 }));
        assert_eq!(results[2], Ok(20.0));
        assert_eq!(problems[2].edges[3].flow, 10.0);
    }
}

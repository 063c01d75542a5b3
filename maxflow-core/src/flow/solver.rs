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

use log::{debug, trace};
use num_traits::Float;

use super::network::{FlowNetwork, VertexId};
use super::residual::Residual;

/// Which vertices the solver treats as source and sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolverConfig {
    pub source: VertexId,
    pub sink: VertexId,
}

impl SolverConfig {
    pub fn new(source: VertexId, sink: VertexId) -> Self {
        SolverConfig { source, sink }
    }
}

impl Default for SolverConfig {
    /// Vertex `0` is the source and vertex `1` the sink.
    fn default() -> Self {
        SolverConfig { source: 0, sink: 1 }
    }
}

/// Edmonds-Karp maximum flow solver.
///
/// Augments along shortest paths (by edge count) of the residual network
/// until none is left. Reverse edges are added to the network lazily, the
/// first time flow is pushed through an edge, and are all removed again
/// before [`solve`](Self::solve) returns, so the topology of the network is
/// the same before and after a solve.
///
/// The solver keeps no state between calls. Solving an already optimal
/// network returns zero; call
/// [`FlowNetwork::reset_flows`](super::FlowNetwork::reset_flows) first to
/// solve from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new(config: SolverConfig) -> Self {
        MaxFlowSolver { config }
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Maximizes the flow from source to sink in place and returns the flow
    /// added by this call.
    ///
    /// If the source or the sink is not a vertex of `network`, or both are the
    /// same vertex, nothing is pushed and zero is returned.
    pub fn solve<F: Float>(&self, network: &mut FlowNetwork<F>) -> F {
        let SolverConfig { source, sink } = self.config;
        let (s, t) = match (network.vertex_index(source), network.vertex_index(sink)) {
            (Some(s), Some(t)) if s != t => (s, t),
            _ => {
                debug!("no flow possible between source {source} and sink {sink}");
                return F::zero();
            }
        };

        debug!(
            "solving max flow from {source} to {sink} over {} vertices and {} edges",
            network.vertex_count(),
            network.edge_count()
        );

        let mut residual = Residual::new(network);
        let mut total = F::zero();
        let mut augmentations = 0usize;

        while residual.find_augmenting_path(network, s, t) {
            let bottleneck = residual.bottleneck(network, t);
            trace!(
                "augmenting path {augmentations} carries {}",
                super::as_f64(bottleneck)
            );
            residual.augment(network, bottleneck);
            total = total + bottleneck;
            augmentations += 1;
        }

        let created = residual.reverse_edge_count();
        let removed = residual.teardown(network);
        debug_assert_eq!(created, removed);
        debug!(
            "max flow {} after {augmentations} augmenting paths, {removed} reverse edges released",
            super::as_f64(total)
        );

        total
    }
}

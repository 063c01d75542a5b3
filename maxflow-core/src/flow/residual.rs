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

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::trace;
use num_traits::Float;

use super::network::{Edge, FlowNetwork};

/// Scratch state of one solve: search buffers plus the ledger of reverse
/// edges materialized in the network so far.
///
/// All indices are arena indices of the network. Reverse edges are appended
/// after the original edges, so everything at or past `original_edges` is
/// solver-owned.
pub(crate) struct Residual {
    visited: FixedBitSet,
    queue: VecDeque<usize>,
    path: Vec<usize>,
    reverse_edges: Vec<usize>,
    original_edges: usize,
}

impl Residual {
    pub(crate) fn new<F>(network: &FlowNetwork<F>) -> Self {
        let vertices = network.vertices.len();
        Residual {
            visited: FixedBitSet::with_capacity(vertices),
            queue: VecDeque::with_capacity(vertices),
            path: Vec::new(),
            reverse_edges: Vec::new(),
            original_edges: network.edges.len(),
        }
    }

    pub(crate) fn reverse_edge_count(&self) -> usize {
        self.reverse_edges.len()
    }

    /// Breadth-first search from `source` over edges with positive residual
    /// capacity. Records predecessor edges on the way and stops as soon as
    /// `sink` is reached.
    pub(crate) fn find_augmenting_path<F: Float>(
        &mut self,
        network: &mut FlowNetwork<F>,
        source: usize,
        sink: usize,
    ) -> bool {
        self.visited.clear();
        self.queue.clear();
        for vertex in &mut network.vertices {
            vertex.pred = None;
        }

        self.visited.insert(source);
        self.queue.push_back(source);

        while let Some(vertex) = self.queue.pop_front() {
            for slot in 0..network.vertices[vertex].edges.len() {
                let Some(edge) = network.vertices[vertex].edges[slot] else {
                    continue;
                };
                let succ = network.edges[edge].to;
                if self.visited.contains(succ) || network.edges[edge].residual() <= F::zero() {
                    continue;
                }

                self.visited.insert(succ);
                network.vertices[succ].pred = Some(edge);
                if succ == sink {
                    return true;
                }
                self.queue.push_back(succ);
            }
        }

        false
    }

    /// Walks the predecessor chain back from `sink` and returns the smallest
    /// residual capacity on it.
    pub(crate) fn bottleneck<F: Float>(&mut self, network: &FlowNetwork<F>, sink: usize) -> F {
        self.path.clear();
        let mut vertex = sink;
        // The source is never assigned a predecessor, so the chain ends there.
        while let Some(edge) = network.vertices[vertex].pred {
            self.path.push(edge);
            vertex = network.edges[edge].from;
        }

        self.path
            .iter()
            .map(|&edge| network.edges[edge].residual())
            .fold(F::infinity(), F::min)
    }

    /// Pushes `amount` along the path found by the last call to
    /// [`bottleneck`](Self::bottleneck).
    pub(crate) fn augment<F: Float>(&mut self, network: &mut FlowNetwork<F>, amount: F) {
        for position in 0..self.path.len() {
            let edge = self.path[position];
            self.push_flow(network, edge, amount);
        }
        trace!("augmented {} edges", self.path.len());
    }

    fn push_flow<F: Float>(&mut self, network: &mut FlowNetwork<F>, edge: usize, amount: F) {
        let reverse = match network.edges[edge].reverse {
            Some(reverse) => reverse,
            None => self.materialize_reverse(network, edge),
        };

        let flow = network.edges[edge].flow + amount;
        self.settle(network, edge, flow);
        let flow = network.edges[reverse].flow - amount;
        self.settle(network, reverse, flow);
    }

    fn materialize_reverse<F: Float>(&mut self, network: &mut FlowNetwork<F>, edge: usize) -> usize {
        let (from, to) = (network.edges[edge].from, network.edges[edge].to);
        let reverse = network.edges.len();

        let mut twin = Edge::new(to, from, F::zero());
        twin.reverse = Some(edge);
        network.edges.push(twin);
        network.edges[edge].reverse = Some(reverse);
        network.vertices[to].connect(reverse);
        self.reverse_edges.push(reverse);
        reverse
    }

    /// Stores `flow` on `edge`, rounding away floating point drift past the
    /// capacity and, for original edges, below zero.
    fn settle<F: Float>(&self, network: &mut FlowNetwork<F>, edge: usize, flow: F) {
        let target = &mut network.edges[edge];
        let flow = flow.min(target.capacity);
        target.flow = if edge < self.original_edges {
            flow.max(F::zero())
        } else {
            flow
        };
    }

    /// Detaches and drops every reverse edge and clears the reverse links of
    /// the original edges. Returns the number of edges removed.
    pub(crate) fn teardown<F>(self, network: &mut FlowNetwork<F>) -> usize {
        for &reverse in self.reverse_edges.iter().rev() {
            let owner = network.edges[reverse].from;
            let detached = network.vertices[owner].disconnect(reverse);
            debug_assert!(detached);
            // Reverse edges sit at the tail of their owner's list.
            network.vertices[owner].trim();

            if let Some(original) = network.edges[reverse].reverse {
                network.edges[original].reverse = None;
            }
        }
        network.edges.truncate(self.original_edges);
        trace!("removed {} reverse edges", self.reverse_edges.len());
        self.reverse_edges.len()
    }
}

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

use thiserror::Error;

use crate::flow::VertexId;

/// Errors reported by [`FlowNetwork`](crate::flow::FlowNetwork) and the
/// solvers built on top of it.
///
/// None of these are retryable: the algorithms are deterministic, so the same
/// input fails the same way again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// The capacity given for an edge is negative, NaN or infinite.
    #[error("invalid capacity {capacity} for edge ({from}, {to})")]
    InvalidCapacity {
        from: VertexId,
        to: VertexId,
        capacity: f64,
    },

    /// An edge with the same ordered `(from, to)` pair is already present.
    #[error("edge ({from}, {to}) already exists")]
    DuplicateEdge { from: VertexId, to: VertexId },

    #[error("no edge ({from}, {to}) in the network")]
    EdgeNotFound { from: VertexId, to: VertexId },

    #[error("no vertex {0} in the network")]
    VertexNotFound(VertexId),
}

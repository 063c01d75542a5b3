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

//! Flow networks and maximum flow.

mod edmonds_karp;
mod network;
mod residual;
mod solver;

use num_traits::Float;

pub use edmonds_karp::{edmonds_karp, MaxFlowReturn};
pub use network::{EdgeKey, FlowEdge, FlowNetwork, VertexId, MAX_SIZE_HINT};
pub use solver::{MaxFlowSolver, SolverConfig};

/// Lossy conversion used for log output.
pub(crate) fn as_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

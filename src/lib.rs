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

//! # maxflow
//!
//! Maximum flow over plain edge records.
//!
//! [`maxflow`] takes a list of `(from, to, capacity, flow)` records, solves
//! the network they describe with vertex `0` as source and vertex `1` as sink
//! and writes the optimal flow of every edge back into its record.
//! [`FlowGraph`] does the same for graphs whose vertices carry arbitrary
//! names. The network and the solver live in [`maxflow_core`].

mod error;
pub mod flow;
pub mod named;

pub use error::GraphError;
pub use flow::{maxflow, maxflow_many, maxflow_with, EdgeRecord, FlowProblem};
pub use maxflow_core::flow::SolverConfig;
pub use maxflow_core::FlowError;
pub use named::FlowGraph;

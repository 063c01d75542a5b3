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

//! # maxflow-core
//!
//! Maximum flow on directed capacitated networks.
//!
//! The crate is made of three layers:
//!
//! * [`table`] - a chained hash table over fixed-width keys whose bucket array
//!   is sized once from an estimate and never grows.
//! * [`flow::FlowNetwork`] - vertices and edges with capacities and flows,
//!   indexed through two fixed-key tables.
//! * [`flow::MaxFlowSolver`] - the Edmonds-Karp algorithm, which pushes flow
//!   along shortest augmenting paths and only adds reverse edges to the
//!   network for the duration of a solve.
//!
//! [`flow::edmonds_karp`] runs the solver over any `petgraph` graph.
//!
//! ```rust
//! use maxflow_core::flow::{FlowNetwork, MaxFlowSolver};
//!
//! let mut network = FlowNetwork::new();
//! network.add_edge(0, 2, 10.0)?;
//! network.add_edge(2, 1, 3.0)?;
//! network.add_edge(0, 1, 1.0)?;
//!
//! let total = MaxFlowSolver::default().solve(&mut network);
//! assert_eq!(total, 4.0);
//! assert_eq!(network.flow(0, 2)?, 3.0);
//! # Ok::<(), maxflow_core::FlowError>(())
//! ```

mod error;
pub mod flow;
pub mod table;

pub use error::FlowError;

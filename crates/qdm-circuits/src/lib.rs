//! `qdm-circuits` — layered parameterized circuits for depth/width sweeps.
//!
//! A [`GateChoice`] names a circuit family; [`CircuitParams`] fixes the
//! family, the sweep ranges and the seed. [`init_circuit`] builds the first
//! point of a sweep and [`add_circuit_layer`] grows it.
//! [`define_gates`] reports the basis gate set a backend needs to accept
//! those circuits.
//!
//! # Quick start
//!
//! ```rust
//! use qdm_circuits::{add_circuit_layer, init_circuit, CircuitParams, GateChoice};
//!
//! let params = CircuitParams {
//!     choice: GateChoice::RyCx,
//!     depth_min: 2,
//!     ..CircuitParams::default()
//! };
//! let mut circuit = init_circuit(&params, 3).unwrap();
//! // 2 layers × (3 Ry + 2 CX)
//! assert_eq!(circuit.num_ops(), 10);
//!
//! add_circuit_layer(&params, 3, &mut circuit, 2).unwrap();
//! assert_eq!(circuit.num_ops(), 15);
//! ```

pub mod basis;
pub mod error;
pub mod layers;
pub mod params;

pub use basis::{BasisGates, GateChoice, SimulationMethod, define_gates};
pub use error::{CircuitError, CircuitResult};
pub use layers::{add_circuit_layer, init_circuit};
pub use params::CircuitParams;

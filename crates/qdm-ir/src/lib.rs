//! QDM Circuit Intermediate Representation
//!
//! This crate provides the data structures every other QDM crate builds on:
//! qubit identifiers, gates and their unitary matrices, symbolic parameters,
//! noise channels, and the [`Circuit`] builder.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] with [`StandardGate::matrix`] returning a [`GateMatrix`]
//! - **Parameters**: [`ParameterExpression`] for symbolic angles
//! - **Noise**: [`NoiseModel`] with Kraus operators, [`NoiseRole`]
//! - **Instructions**: [`Instruction`] combining an operation with its operands
//! - **Circuit**: [`Circuit`], an ordered, validated instruction list
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qdm_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 0);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Noisy Circuit
//!
//! ```rust
//! use qdm_ir::{Circuit, NoiseModel, QubitId};
//!
//! let mut circuit = Circuit::with_size("decay", 1, 0);
//! circuit.x(QubitId(0)).unwrap();
//! circuit
//!     .noise(NoiseModel::AmplitudeDamping { gamma: 0.1 }, [QubitId(0)])
//!     .unwrap();
//! assert_eq!(circuit.num_ops(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{GateMatrix, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use noise::{NoiseModel, NoiseRole};
pub use parameter::{BinaryOp, ParameterExpression};
pub use qubit::{ClbitId, Qubit, QubitId};

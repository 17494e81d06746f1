//! Wire identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qubit wire index.
///
/// Qubit `q` is bit `q` of a computational-basis index, so `|q2 q1 q0⟩`
/// is basis state `4·q2 + 2·q1 + q0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Mask selecting this qubit's bit in a basis index.
    #[inline]
    pub fn mask(self) -> usize {
        1 << self.0
    }
}

/// Classical bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClbitId(pub u32);

macro_rules! wire_id {
    ($ty:ident, $prefix:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $ty {
            fn from(id: u32) -> Self {
                $ty(id)
            }
        }
    };
}

wire_id!(QubitId, "q");
wire_id!(ClbitId, "c");

/// A qubit wire, optionally tagged with the register it was allocated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    pub id: QubitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<String>,
}

impl Qubit {
    pub fn new(id: QubitId) -> Self {
        Self { id, register: None }
    }

    pub fn with_register(id: QubitId, register: impl Into<String>) -> Self {
        Self {
            id,
            register: Some(register.into()),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(reg) = &self.register {
            write!(f, "{reg}[{}]", self.id.0)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

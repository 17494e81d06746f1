//! Rotation angles, either numeric or symbolic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;
use std::fmt;

/// Binary arithmetic on angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn eval(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

/// An angle expression.
///
/// Gates only produce matrices once every symbol is bound; see
/// [`ParameterExpression::bind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterExpression {
    /// Numeric angle in radians.
    Value(f64),
    /// π.
    Pi,
    /// Named free parameter.
    Symbol(String),
    Neg(Box<ParameterExpression>),
    Binary(BinaryOp, Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Value(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        ParameterExpression::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Whether any symbol is still free.
    pub fn is_symbolic(&self) -> bool {
        self.first_symbol().is_some()
    }

    /// Leftmost free symbol.
    pub fn first_symbol(&self) -> Option<&str> {
        match self {
            ParameterExpression::Symbol(name) => Some(name),
            ParameterExpression::Value(_) | ParameterExpression::Pi => None,
            ParameterExpression::Neg(e) => e.first_symbol(),
            ParameterExpression::Binary(_, a, b) => a.first_symbol().or_else(|| b.first_symbol()),
        }
    }

    /// Free symbols, sorted by name.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                ParameterExpression::Symbol(name) => {
                    out.insert(name.as_str());
                }
                ParameterExpression::Value(_) | ParameterExpression::Pi => {}
                ParameterExpression::Neg(e) => stack.push(e),
                ParameterExpression::Binary(_, a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
            }
        }
        out
    }

    /// Numeric value, or `None` while a symbol is free.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Value(v) => Some(*v),
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Binary(op, a, b) => Some(op.eval(a.as_f64()?, b.as_f64()?)),
        }
    }

    /// Replace every symbol for which `lookup` yields a value.
    #[must_use]
    pub fn substitute(&self, lookup: &impl Fn(&str) -> Option<f64>) -> Self {
        match self {
            ParameterExpression::Symbol(name) => match lookup(name.as_str()) {
                Some(v) => ParameterExpression::Value(v),
                None => self.clone(),
            },
            ParameterExpression::Value(_) | ParameterExpression::Pi => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.substitute(lookup))),
            ParameterExpression::Binary(op, a, b) => {
                Self::binary(*op, a.substitute(lookup), b.substitute(lookup))
            }
        }
    }

    /// Bind one symbol.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.substitute(&|s: &str| (s == name).then_some(value))
    }

    /// Bind every symbol found in `values`.
    #[must_use]
    pub fn bind_all(&self, values: &BTreeMap<String, f64>) -> Self {
        self.substitute(&|s: &str| values.get(s).copied())
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Value(v) => write!(f, "{v}"),
            ParameterExpression::Pi => f.write_str("π"),
            ParameterExpression::Symbol(name) => f.write_str(name),
            ParameterExpression::Neg(e) => write!(f, "-{e}"),
            ParameterExpression::Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbol()),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Value(value)
    }
}

impl From<&str> for ParameterExpression {
    fn from(name: &str) -> Self {
        ParameterExpression::symbol(name)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl std::ops::$trait for ParameterExpression {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::binary($op, self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self {
        ParameterExpression::Neg(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_is_free() {
        let p = ParameterExpression::symbol("theta");
        assert!(p.is_symbolic());
        assert_eq!(p.as_f64(), None);
        assert_eq!(p.first_symbol(), Some("theta"));
    }

    #[test]
    fn test_bind_inside_expression() {
        let expr = ParameterExpression::pi() * "t".into() / ParameterExpression::constant(2.0)
            + ParameterExpression::constant(1.0);
        let bound = expr.bind("t", 0.5);
        assert!(!bound.is_symbolic());
        assert!((bound.as_f64().unwrap() - (PI / 4.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_bind_all_leaves_unknown_symbols() {
        let expr = ParameterExpression::symbol("a") - ParameterExpression::symbol("b");
        let values = BTreeMap::from([("a".to_string(), 3.0)]);
        let partial = expr.bind_all(&values);
        assert_eq!(partial.symbols().into_iter().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(partial.bind("b", 1.0).as_f64(), Some(2.0));
    }

    #[test]
    fn test_neg_display() {
        let p = -ParameterExpression::symbol("x");
        assert_eq!(p.to_string(), "-x");
        assert_eq!((-ParameterExpression::constant(2.0)).as_f64(), Some(-2.0));
    }
}

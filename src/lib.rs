//! Factored-form Boolean expression algebra.
//!
//! An [`Expr`] is an immutable tree of AND/OR/XOR operators over
//! variable literals and the constants 0/1. Every construction path
//! goes through an [`ExprFactory`], which keeps the tree canonical:
//! nested same-kind operators flatten, constants absorb, and duplicate
//! or complementary operands cancel. Two expressions compare equal iff
//! they're the same Boolean function in this canonical form.
//!
//! ```
//! use boolexpr::{Expr, ExprFactory, VarId};
//!
//! let mut factory = ExprFactory::new();
//! let a = Expr::posi_literal(VarId::new(0));
//! let b = Expr::posi_literal(VarId::new(1));
//! let and_ab = a.clone() & b.clone();
//! let also_and_ab = factory.complement(&(!a | !b));
//! assert_eq!(and_ab, also_and_ab);
//! ```

mod error;
mod factory;
mod handle;
mod id;
mod literal;
mod node;
mod serialize;

pub mod analysis;

pub use error::BoolExprError;
pub use factory::ExprFactory;
pub use handle::Expr;
pub use id::VarId;
pub use literal::Literal;

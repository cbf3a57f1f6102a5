//! Analysis of already-built expressions: equivalence checks used by the
//! canonicalizing factory, SOP cost estimation, primitive gate-type
//! classification, and bit-parallel evaluation.

pub(crate) mod equiv;

mod cost;
mod eval;
mod prim_type;

pub use cost::SopLit;
pub use prim_type::{analyze_with, to_tvfunc, PrimType, PrimTypeClassifier, TvFuncBuilder};

pub(crate) use cost::{input_size, litnum, litnum_lit, litnum_var, soplit, soplit_literal, soplit_var};
pub(crate) use eval::eval;
pub(crate) use prim_type::analyze;

//! Primitive gate-type classification.

use crate::handle::Expr;
use crate::id::VarId;

/// The primitive gate type an expression reduces to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimType {
    None,
    Const0,
    Const1,
    Buf,
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

/// Classifies `expr` as a single-gate primitive using only structural
/// shortcuts -- never falls back to a truth table. Complex expressions
/// that aren't one of the built-in shapes return `PrimType::None`; use
/// [`analyze_with`] if a ≤10-input fallback is available.
pub(crate) fn analyze(expr: &Expr) -> PrimType {
    if expr.is_zero() {
        return PrimType::Const0;
    }
    if expr.is_one() {
        return PrimType::Const1;
    }
    if expr.is_positive_literal() {
        return PrimType::Buf;
    }
    if expr.is_negative_literal() {
        return PrimType::Not;
    }

    let ops = expr.operand_list();
    let mut phase: i64 = 0;
    let mut parity = false;
    let mut ok = true;
    for o in &ops {
        if !o.is_literal() {
            ok = false;
            break;
        }
        if o.is_positive_literal() {
            phase += 1;
        } else {
            phase -= 1;
            parity = !parity;
        }
    }
    if ok {
        let n = ops.len() as i64;
        if expr.is_and() {
            if phase == n {
                return PrimType::And;
            }
            if phase == -n {
                return PrimType::Nor;
            }
        } else if expr.is_or() {
            if phase == n {
                return PrimType::Or;
            }
            if phase == -n {
                return PrimType::Nand;
            }
        } else if expr.is_xor() {
            return if !parity { PrimType::Xor } else { PrimType::Xnor };
        }
    }
    PrimType::None
}

/// A collaborator that classifies an expression too complex for
/// [`analyze`]'s structural shortcuts by materializing it into a truth
/// table. Building that table is out of scope for this crate (it needs
/// a dedicated truth-table engine); implement this trait against
/// whatever one the caller already has.
pub trait PrimTypeClassifier {
    /// The truth-table representation this classifier works with.
    type Table;

    /// Builds the truth table for `expr` over `input_count` variables.
    fn build(&self, expr: &Expr, input_count: usize) -> Self::Table;

    /// Classifies an already-built truth table.
    fn classify(&self, table: &Self::Table) -> PrimType;
}

/// Like [`analyze`], but falls back to `classifier` for expressions with
/// at most 10 inputs that aren't single-gate primitives. Expressions
/// with more than 10 inputs are reported as `PrimType::None` without
/// consulting the classifier, matching the original source's cutoff.
pub fn analyze_with<C: PrimTypeClassifier>(expr: &Expr, classifier: &C) -> PrimType {
    let simple = analyze(expr);
    if simple != PrimType::None {
        return simple;
    }
    let input_count = expr.input_size();
    if input_count <= 10 {
        let table = classifier.build(expr, input_count);
        classifier.classify(&table)
    } else {
        PrimType::None
    }
}

/// A collaborator that materializes an expression into an external
/// truth-table representation. As with [`PrimTypeClassifier`], building
/// `TvFunc`-style tables is out of scope here; this trait just wires a
/// node-by-node AND/OR/XOR fold into whatever table type the caller has.
pub trait TvFuncBuilder {
    type Table;

    fn zero(&self, input_count: usize) -> Self::Table;
    fn one(&self, input_count: usize) -> Self::Table;
    fn posi_literal(&self, input_count: usize, varid: VarId) -> Self::Table;
    fn nega_literal(&self, input_count: usize, varid: VarId) -> Self::Table;
    fn and(&self, a: Self::Table, b: Self::Table) -> Self::Table;
    fn or(&self, a: Self::Table, b: Self::Table) -> Self::Table;
    fn xor(&self, a: Self::Table, b: Self::Table) -> Self::Table;
}

/// Builds `expr`'s truth table over `input_count` variables using `builder`.
pub fn to_tvfunc<B: TvFuncBuilder>(expr: &Expr, input_count: usize, builder: &B) -> B::Table {
    if expr.is_zero() {
        return builder.zero(input_count);
    }
    if expr.is_one() {
        return builder.one(input_count);
    }
    if expr.is_positive_literal() {
        return builder.posi_literal(input_count, expr.varid());
    }
    if expr.is_negative_literal() {
        return builder.nega_literal(input_count, expr.varid());
    }

    let ops = expr.operand_list();
    let mut it = ops.into_iter();
    let mut acc = to_tvfunc(&it.next().expect("operator node has at least one operand"), input_count, builder);
    for o in it {
        let t = to_tvfunc(&o, input_count, builder);
        acc = if expr.is_and() {
            builder.and(acc, t)
        } else if expr.is_or() {
            builder.or(acc, t)
        } else {
            builder.xor(acc, t)
        };
    }
    acc
}

//! Literal counting and SOP (sum-of-products) cost estimation.
//!
//! `SopLit` is a `(product_count, literal_count)` pair that approximates
//! the cost of expanding an expression into sum-of-products form without
//! actually performing the expansion.

use std::ops::{Add, Mul};

use crate::handle::Expr;
use crate::id::VarId;

/// A `(product-term count, literal count)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SopLit {
    np: usize,
    nl: usize,
}

impl SopLit {
    /// Builds a pair directly from a product-term count and literal count.
    pub const fn new(np: usize, nl: usize) -> Self {
        SopLit { np, nl }
    }

    /// The additive identity: zero product terms, zero literals.
    pub const fn zero() -> Self {
        SopLit::new(0, 0)
    }

    /// Number of product terms.
    pub const fn np(self) -> usize {
        self.np
    }

    /// Number of literals.
    pub const fn nl(self) -> usize {
        self.nl
    }
}

impl Add for SopLit {
    type Output = SopLit;

    fn add(self, rhs: SopLit) -> SopLit {
        SopLit::new(self.np + rhs.np, self.nl + rhs.nl)
    }
}

impl Mul for SopLit {
    type Output = SopLit;

    fn mul(self, rhs: SopLit) -> SopLit {
        SopLit::new(self.np * rhs.np, self.nl * rhs.np + rhs.nl * self.np)
    }
}

pub(crate) fn litnum(expr: &Expr) -> usize {
    if expr.is_literal() {
        return 1;
    }
    expr.operand_list().iter().map(litnum).sum()
}

pub(crate) fn litnum_var(expr: &Expr, varid: VarId) -> usize {
    if expr.is_literal() && expr.varid() == varid {
        return 1;
    }
    expr.operand_list().iter().map(|o| litnum_var(o, varid)).sum()
}

pub(crate) fn litnum_lit(expr: &Expr, varid: VarId, inv: bool) -> usize {
    if expr.is_literal_with_polarity(inv) && expr.varid() == varid {
        return 1;
    }
    expr.operand_list()
        .iter()
        .map(|o| litnum_lit(o, varid, inv))
        .sum()
}

pub(crate) fn input_size(expr: &Expr) -> usize {
    if expr.is_literal() {
        return expr.varid().index() as usize + 1;
    }
    expr.operand_list().iter().map(input_size).max().unwrap_or(0)
}

#[derive(Clone, Copy)]
enum Target {
    All,
    Var(VarId),
    Lit(VarId, bool),
}

fn leaf(expr: &Expr, target: Target) -> SopLit {
    let matches = match target {
        Target::All => true,
        Target::Var(v) => expr.varid() == v,
        Target::Lit(v, inv) => expr.varid() == v && expr.is_literal_with_polarity(inv),
    };
    if matches {
        SopLit::new(1, 1)
    } else {
        SopLit::new(1, 0)
    }
}

fn soplit_inner(expr: &Expr, inverted: bool, target: Target) -> SopLit {
    if expr.is_literal() {
        return leaf(expr, target);
    }
    if expr.is_and() || expr.is_or() {
        let product = (expr.is_and() && !inverted) || (expr.is_or() && inverted);
        let ops = expr.operand_list();
        if product {
            ops.iter()
                .fold(SopLit::new(1, 0), |acc, o| acc * soplit_inner(o, inverted, target))
        } else {
            ops.iter()
                .fold(SopLit::zero(), |acc, o| acc + soplit_inner(o, inverted, target))
        }
    } else if expr.is_xor() {
        let ops = expr.operand_list();
        let mut lp = soplit_inner(&ops[0], inverted, target);
        let mut ln = soplit_inner(&ops[0], !inverted, target);
        for o in ops.iter().skip(1) {
            let l2p = soplit_inner(o, false, target);
            let l2n = soplit_inner(o, true, target);
            let new_lp = lp * l2n + ln * l2p;
            let new_ln = lp * l2p + ln * l2n;
            lp = new_lp;
            ln = new_ln;
        }
        lp
    } else {
        SopLit::zero()
    }
}

pub(crate) fn soplit(expr: &Expr, inverted: bool) -> SopLit {
    soplit_inner(expr, inverted, Target::All)
}

pub(crate) fn soplit_var(expr: &Expr, inverted: bool, varid: VarId) -> SopLit {
    soplit_inner(expr, inverted, Target::Var(varid))
}

pub(crate) fn soplit_literal(expr: &Expr, inverted: bool, varid: VarId, inv: bool) -> SopLit {
    soplit_inner(expr, inverted, Target::Lit(varid, inv))
}

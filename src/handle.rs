//! The public handle to a Boolean expression.
//!
//! `Expr` is a thin, cheaply-cloneable wrapper around an `Rc`-shared
//! [`Node`] tree. It never exposes `Node` itself -- every accessor
//! below is the only way external code can look inside one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::rc::Rc;

use crate::analysis;
use crate::analysis::equiv::{hash_node, posi_equiv};
use crate::analysis::{PrimType, PrimTypeClassifier, SopLit, TvFuncBuilder};
use crate::error::BoolExprError;
use crate::id::VarId;
use crate::literal::Literal;
use crate::node::Node;

/// A Boolean expression in factored form.
///
/// `Expr` is an immutable handle: every transform (`&`, `|`, `^`, `!`,
/// [`ExprFactory`](crate::ExprFactory) methods) returns a new `Expr`
/// rather than mutating one in place. Cloning is a reference-count
/// bump, not a copy of the tree.
#[derive(Debug, Clone)]
pub struct Expr {
    root: Option<Rc<Node>>,
}

impl Expr {
    pub(crate) fn from_node(node: Rc<Node>) -> Self {
        Expr { root: Some(node) }
    }

    pub(crate) fn into_node(self) -> Rc<Node> {
        self.root.expect("operand pushed into ExprFactory must be valid")
    }

    pub(crate) fn node(&self) -> &Rc<Node> {
        self.root.as_ref().expect("operation on an invalid Expr")
    }

    /// An expression with no underlying tree. Used as a sentinel by
    /// code that builds an `Expr` incrementally; every other
    /// constructor and transform produces a valid `Expr`.
    pub const fn invalid() -> Self {
        Expr { root: None }
    }

    /// The constant 0.
    pub fn zero() -> Self {
        Expr::from_node(Rc::new(Node::Const0))
    }

    /// The constant 1.
    pub fn one() -> Self {
        Expr::from_node(Rc::new(Node::Const1))
    }

    /// The positive literal for `varid`.
    pub fn posi_literal(varid: VarId) -> Self {
        Expr::from_node(Rc::new(Node::PosLit(varid)))
    }

    /// The negative literal for `varid`.
    pub fn nega_literal(varid: VarId) -> Self {
        Expr::from_node(Rc::new(Node::NegLit(varid)))
    }

    /// Builds a literal expression from a [`Literal`].
    pub fn from_literal(lit: Literal) -> Self {
        if lit.is_inverted() {
            Expr::nega_literal(lit.varid())
        } else {
            Expr::posi_literal(lit.varid())
        }
    }

    /// ANDs every expression in `exprs` together. `and_of(&[])` is `one()`.
    pub fn and_of(exprs: &[Expr]) -> Self {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        for e in exprs {
            f.push(e.clone());
        }
        f.and_op(begin)
    }

    /// ORs every expression in `exprs` together. `or_of(&[])` is `zero()`.
    pub fn or_of(exprs: &[Expr]) -> Self {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        for e in exprs {
            f.push(e.clone());
        }
        f.or_op(begin)
    }

    /// XORs every expression in `exprs` together. `xor_of(&[])` is `zero()`.
    pub fn xor_of(exprs: &[Expr]) -> Self {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        for e in exprs {
            f.push(e.clone());
        }
        f.xor_op(begin)
    }

    /// True if this `Expr` has an underlying tree.
    pub fn is_valid(&self) -> bool {
        self.root.is_some()
    }

    /// True if this `Expr` has no underlying tree.
    pub fn is_invalid(&self) -> bool {
        self.root.is_none()
    }

    pub fn is_zero(&self) -> bool {
        self.node().is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.node().is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.node().is_constant()
    }

    pub fn is_positive_literal(&self) -> bool {
        self.node().is_pos_literal()
    }

    pub fn is_negative_literal(&self) -> bool {
        self.node().is_neg_literal()
    }

    pub fn is_literal(&self) -> bool {
        self.node().is_literal()
    }

    /// True if this is a literal with the given polarity (`inv = true`
    /// for a negative literal).
    pub fn is_literal_with_polarity(&self, inv: bool) -> bool {
        if inv {
            self.is_negative_literal()
        } else {
            self.is_positive_literal()
        }
    }

    pub fn is_and(&self) -> bool {
        self.node().is_and()
    }

    pub fn is_or(&self) -> bool {
        self.node().is_or()
    }

    pub fn is_xor(&self) -> bool {
        self.node().is_xor()
    }

    pub fn is_op(&self) -> bool {
        self.node().is_op()
    }

    /// True if `self` and `other` are both operators of the same kind
    /// (AND/AND, OR/OR, or XOR/XOR).
    pub fn same_root_kind(&self, other: &Expr) -> bool {
        (self.is_and() && other.is_and())
            || (self.is_or() && other.is_or())
            || (self.is_xor() && other.is_xor())
    }

    /// True if this is a constant, a literal, or an operator whose
    /// operands are all literals.
    pub fn is_simple(&self) -> bool {
        !self.is_op() || self.operand_list().iter().all(Expr::is_literal)
    }

    pub fn is_simple_and(&self) -> bool {
        self.is_and() && self.operand_list().iter().all(Expr::is_literal)
    }

    pub fn is_simple_or(&self) -> bool {
        self.is_or() && self.operand_list().iter().all(Expr::is_literal)
    }

    pub fn is_simple_xor(&self) -> bool {
        self.is_xor() && self.operand_list().iter().all(Expr::is_literal)
    }

    /// True for an OR of (literals or simple ANDs) -- a sum of products
    /// -- or plainer shapes: a literal, a constant, or a simple AND/OR.
    pub fn is_sop(&self) -> bool {
        if self.is_literal() || self.is_constant() {
            return true;
        }
        if self.is_simple_and() || self.is_simple_or() {
            return true;
        }
        if self.is_or() {
            return self.operand_list().iter().all(|o| o.is_literal() || o.is_simple_and());
        }
        false
    }

    /// The variable this literal refers to, or [`VarId::BAD`] if this
    /// isn't a literal.
    pub fn varid(&self) -> VarId {
        self.node().varid()
    }

    /// The literal this expression represents, or `None` if it isn't one.
    pub fn literal(&self) -> Option<Literal> {
        if self.is_positive_literal() {
            Some(Literal::positive(self.varid()))
        } else if self.is_negative_literal() {
            Some(Literal::negative(self.varid()))
        } else {
            None
        }
    }

    /// Number of direct operands (0 for leaves).
    pub fn operand_count(&self) -> usize {
        self.node().operands().len()
    }

    /// The operand at `pos`, or an error if out of range.
    pub fn operand(&self, pos: usize) -> Result<Expr, BoolExprError> {
        self.node()
            .operand(pos)
            .map(|n| Expr::from_node(Rc::clone(n)))
            .ok_or(BoolExprError::OutOfRange { index: pos, len: self.operand_count() })
    }

    /// All direct operands, in order.
    pub fn operand_list(&self) -> Vec<Expr> {
        self.node().operands().iter().map(|n| Expr::from_node(Rc::clone(n))).collect()
    }

    /// Total number of literals in the tree (with multiplicity).
    pub fn literal_num(&self) -> usize {
        analysis::litnum(self)
    }

    /// Number of literals referring to `varid` (either polarity).
    pub fn literal_num_of(&self, varid: VarId) -> usize {
        analysis::litnum_var(self, varid)
    }

    /// Number of literals referring to `varid` with polarity `inv`.
    pub fn literal_num_of_literal(&self, varid: VarId, inv: bool) -> usize {
        analysis::litnum_lit(self, varid, inv)
    }

    /// One past the highest variable index referenced anywhere in the
    /// tree (0 for a constant).
    pub fn input_size(&self) -> usize {
        analysis::input_size(self)
    }

    /// Sum-of-products cost estimate for this expression (or its
    /// complement, if `inverted`).
    pub fn soplit(&self, inverted: bool) -> SopLit {
        analysis::soplit(self, inverted)
    }

    /// Like [`Expr::soplit`], restricted to product terms containing `varid`.
    pub fn soplit_of(&self, inverted: bool, varid: VarId) -> SopLit {
        analysis::soplit_var(self, inverted, varid)
    }

    /// Like [`Expr::soplit`], restricted to the given literal.
    pub fn soplit_of_literal(&self, inverted: bool, varid: VarId, inv: bool) -> SopLit {
        analysis::soplit_literal(self, inverted, varid, inv)
    }

    /// Classifies this expression as a single primitive gate, using
    /// only structural shortcuts.
    pub fn analyze(&self) -> PrimType {
        analysis::analyze(self)
    }

    /// Like [`Expr::analyze`], with a fallback for ≤10-input expressions
    /// that aren't already a single-gate shape.
    pub fn analyze_with<C: PrimTypeClassifier>(&self, classifier: &C) -> PrimType {
        crate::analysis::analyze_with(self, classifier)
    }

    /// Evaluates this expression against up to 64 simultaneous input
    /// assignments packed bitwise into `vals` (one entry per variable).
    /// Errors if `vals` has fewer entries than [`Expr::input_size`].
    pub fn eval(&self, vals: &[u64], mask: u64) -> Result<u64, BoolExprError> {
        let need = self.input_size();
        if vals.len() < need {
            return Err(BoolExprError::ArgumentError { need, got: vals.len() });
        }
        Ok(analysis::eval(self, vals, mask))
    }

    /// Materializes this expression into an external truth-table
    /// representation via `builder`.
    pub fn to_tvfunc<B: TvFuncBuilder>(&self, input_count: usize, builder: &B) -> B::Table {
        crate::analysis::to_tvfunc(self, input_count, builder)
    }

    /// Serializes this expression to its canonical, round-trip-safe
    /// rep-string form.
    pub fn rep_string(&self) -> String {
        crate::serialize::repstring::write(self)
    }

    /// Parses a rep-string produced by [`Expr::rep_string`].
    pub fn from_rep_string(s: &str) -> Result<Expr, BoolExprError> {
        crate::serialize::repstring::parse(s)
    }

    /// Serializes this expression to its compact binary form.
    pub fn dump(&self) -> Vec<u8> {
        crate::serialize::binary::write(self)
    }

    /// Parses the binary form produced by [`Expr::dump`].
    pub fn restore(bytes: &[u8]) -> Result<Expr, BoolExprError> {
        crate::serialize::binary::read(bytes)
    }

    /// Parses a human-readable infix expression (AND/OR/NOT only --
    /// use [`Expr::from_rep_string`] for XOR).
    pub fn from_string(s: &str) -> Result<Expr, BoolExprError> {
        crate::serialize::infix::parse(s)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        crate::ExprFactory::new().complement(&self)
    }
}

impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        crate::ExprFactory::new().complement(self)
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        f.push(self);
        f.push(rhs);
        f.and_op(begin)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        f.push(self);
        f.push(rhs);
        f.or_op(begin)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Expr) -> Expr {
        let mut f = crate::ExprFactory::new();
        let begin = f.top();
        f.push(self);
        f.push(rhs);
        f.xor_op(begin)
    }
}

impl BitAndAssign for Expr {
    fn bitand_assign(&mut self, rhs: Expr) {
        *self = self.clone() & rhs;
    }
}

impl BitOrAssign for Expr {
    fn bitor_assign(&mut self, rhs: Expr) {
        *self = self.clone() | rhs;
    }
}

impl BitXorAssign for Expr {
    fn bitxor_assign(&mut self, rhs: Expr) {
        *self = self.clone() ^ rhs;
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::serialize::infix::write(self, f)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => posi_equiv(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.root {
            Some(n) => hash_node(n, state),
            None => 0xFFu8.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_are_constants() {
        assert!(Expr::zero().is_zero());
        assert!(Expr::one().is_one());
        assert!(Expr::zero().is_constant());
    }

    #[test]
    fn literal_roundtrips_through_literal_method() {
        let lit = Literal::negative(VarId::new(2));
        let e = Expr::from_literal(lit);
        assert_eq!(e.literal(), Some(lit));
    }

    #[test]
    fn invalid_expr_reports_invalid() {
        assert!(Expr::invalid().is_invalid());
        assert!(!Expr::invalid().is_valid());
    }

    #[test]
    fn equality_uses_structural_equivalence() {
        assert_eq!(Expr::posi_literal(VarId::new(0)), Expr::posi_literal(VarId::new(0)));
        assert_ne!(Expr::posi_literal(VarId::new(0)), Expr::nega_literal(VarId::new(0)));
    }

    #[test]
    fn empty_and_of_is_one() {
        assert!(Expr::and_of(&[]).is_one());
    }

    #[test]
    fn empty_or_of_and_xor_of_are_zero() {
        assert!(Expr::or_of(&[]).is_zero());
        assert!(Expr::xor_of(&[]).is_zero());
    }

    #[test]
    fn and_of_builds_conjunction() {
        let e = Expr::and_of(&[Expr::posi_literal(VarId::new(0)), Expr::posi_literal(VarId::new(1))]);
        assert!(e.is_and());
        assert_eq!(e.operand_count(), 2);
    }

    #[test]
    fn bitops_match_and_of_or_of() {
        let a = Expr::posi_literal(VarId::new(0));
        let b = Expr::posi_literal(VarId::new(1));
        assert_eq!(a.clone() & b.clone(), Expr::and_of(&[a.clone(), b.clone()]));
        assert_eq!(a.clone() | b.clone(), Expr::or_of(&[a, b]));
    }

    #[test]
    fn not_is_involution() {
        let a = Expr::posi_literal(VarId::new(0));
        assert_eq!(!(!a.clone()), a);
    }

    #[test]
    fn eval_and_of_two_literals() {
        let e = Expr::posi_literal(VarId::new(0)) & Expr::posi_literal(VarId::new(1));
        let vals = [0b10u64, 0b01u64];
        assert_eq!(e.eval(&vals, 1).unwrap(), 0);
        let vals = [0b1u64, 0b1u64];
        assert_eq!(e.eval(&vals, 1).unwrap(), 1);
    }

    #[test]
    fn eval_reports_short_value_vector() {
        let e = Expr::posi_literal(VarId::new(2));
        let err = e.eval(&[0, 0], 1).unwrap_err();
        assert_eq!(err, BoolExprError::ArgumentError { need: 3, got: 2 });
    }

    #[test]
    fn constants_are_simple() {
        assert!(Expr::zero().is_simple());
        assert!(Expr::one().is_simple());
    }

    #[test]
    fn sum_of_products_is_sop_but_product_of_sums_is_not() {
        let p0 = Expr::posi_literal(VarId::new(0));
        let p1 = Expr::posi_literal(VarId::new(1));
        let p2 = Expr::posi_literal(VarId::new(2));
        let p3 = Expr::posi_literal(VarId::new(3));

        let sop = Expr::or_of(&[p0.clone() & p1.clone(), p2.clone() & p3.clone()]);
        assert!(sop.is_sop());

        let pos = Expr::and_of(&[p0 | p1, p2 | p3]);
        assert!(!pos.is_sop());
    }
}

//! The immutable node tree underlying every [`crate::Expr`].
//!
//! `Node` is a private implementation detail: `Expr` wraps an
//! `Option<Rc<Node>>` and only hands out `Node`-level access to the two
//! places that need it -- [`crate::factory::ExprFactory`], which builds
//! canonical trees, and [`crate::analysis::equiv`], which compares them
//! without allocating. Everything else in the crate, including the rest
//! of `analysis`, works through `Expr`'s own public accessors.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::id::VarId;

/// Operand lists are short in practice (most gates have 2-4 inputs), so
/// a handful fit inline without a heap allocation.
pub(crate) type OperandList = SmallVec<[Rc<Node>; 4]>;

/// A node in a canonical, structurally-shared expression tree.
#[derive(Debug)]
pub(crate) enum Node {
    Const0,
    Const1,
    PosLit(VarId),
    NegLit(VarId),
    And(OperandList),
    Or(OperandList),
    Xor(OperandList),
}

impl Node {
    pub(crate) fn is_zero(&self) -> bool {
        matches!(self, Node::Const0)
    }

    pub(crate) fn is_one(&self) -> bool {
        matches!(self, Node::Const1)
    }

    pub(crate) fn is_constant(&self) -> bool {
        matches!(self, Node::Const0 | Node::Const1)
    }

    pub(crate) fn is_pos_literal(&self) -> bool {
        matches!(self, Node::PosLit(_))
    }

    pub(crate) fn is_neg_literal(&self) -> bool {
        matches!(self, Node::NegLit(_))
    }

    pub(crate) fn is_literal(&self) -> bool {
        self.is_pos_literal() || self.is_neg_literal()
    }

    pub(crate) fn is_and(&self) -> bool {
        matches!(self, Node::And(_))
    }

    pub(crate) fn is_or(&self) -> bool {
        matches!(self, Node::Or(_))
    }

    pub(crate) fn is_xor(&self) -> bool {
        matches!(self, Node::Xor(_))
    }

    pub(crate) fn is_op(&self) -> bool {
        self.is_and() || self.is_or() || self.is_xor()
    }

    pub(crate) fn varid(&self) -> VarId {
        match self {
            Node::PosLit(v) | Node::NegLit(v) => *v,
            _ => VarId::BAD,
        }
    }

    pub(crate) fn operands(&self) -> &[Rc<Node>] {
        match self {
            Node::And(ops) | Node::Or(ops) | Node::Xor(ops) => ops,
            _ => &[],
        }
    }

    pub(crate) fn operand(&self, pos: usize) -> Option<&Rc<Node>> {
        self.operands().get(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_predicates() {
        let c0 = Node::Const0;
        assert!(c0.is_zero());
        assert!(c0.is_constant());
        assert!(!c0.is_op());

        let p = Node::PosLit(VarId::new(1));
        assert!(p.is_literal());
        assert!(p.is_pos_literal());
        assert_eq!(p.varid(), VarId::new(1));

        let n = Node::NegLit(VarId::new(2));
        assert!(n.is_neg_literal());
        assert!(!n.is_pos_literal());
    }

    #[test]
    fn operand_access() {
        let a: OperandList = [Rc::new(Node::Const0), Rc::new(Node::Const1)]
            .into_iter()
            .collect();
        let and = Node::And(a);
        assert_eq!(and.operands().len(), 2);
        assert!(and.operand(0).unwrap().is_zero());
        assert!(and.operand(5).is_none());
    }
}

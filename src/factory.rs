//! The canonicalizing node factory.
//!
//! Every AND/OR/XOR construction flows through [`ExprFactory::and_op`],
//! [`ExprFactory::or_op`], or [`ExprFactory::xor_op`]: they flatten
//! nested same-kind operators, fold constants, and cancel duplicate or
//! complementary operands. `ExprFactory` keeps a transient operand stack
//! (`push`/`top`/`pop_to`) and a scratch list reused across calls --
//! it is not thread safe. Give each worker thread its own factory.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::analysis::equiv::{nega_equiv, posi_equiv};
use crate::handle::Expr;
use crate::id::VarId;
use crate::node::Node;

/// Builds canonical expression trees.
#[derive(Debug, Default)]
pub struct ExprFactory {
    stack: Vec<Rc<Node>>,
    scratch: Vec<Rc<Node>>,
}

impl ExprFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an operand onto the stack.
    ///
    /// Panics if `expr` is invalid -- operands must be fully-formed
    /// expressions.
    pub fn push(&mut self, expr: Expr) {
        self.stack.push(expr.into_node());
    }

    /// Returns the current stack depth; pass this as `begin` to a later
    /// `and_op`/`or_op`/`xor_op` call.
    pub fn top(&self) -> usize {
        self.stack.len()
    }

    /// Discards everything pushed since `mark` without building a node.
    /// Needed when operands were pushed but the caller decides not to
    /// call one of the `*_op` methods after all.
    pub fn pop_to(&mut self, mark: usize) {
        self.stack.truncate(mark);
    }

    /// Checks `node` against the scratch list (AND/OR semantics): a
    /// structural duplicate is dropped silently (returns `false`); a
    /// structural complement short-circuits the whole operator (returns
    /// `true`); otherwise `node` is appended.
    fn check_node(&mut self, node: &Rc<Node>) -> bool {
        for existing in &self.scratch {
            if posi_equiv(node, existing) {
                return false;
            }
            if nega_equiv(node, existing) {
                return true;
            }
        }
        self.scratch.push(Rc::clone(node));
        false
    }

    /// Like `check_node`, but for XOR: a structural duplicate cancels
    /// (both copies vanish, parity unaffected); a structural complement
    /// also cancels but flips parity (returns `true`).
    fn check_node2(&mut self, node: &Rc<Node>) -> bool {
        let mut found = None;
        for (i, existing) in self.scratch.iter().enumerate() {
            if posi_equiv(node, existing) {
                found = Some((i, false));
                break;
            }
            if nega_equiv(node, existing) {
                found = Some((i, true));
                break;
            }
        }
        match found {
            Some((i, inverted)) => {
                self.scratch.remove(i);
                inverted
            }
            None => {
                self.scratch.push(Rc::clone(node));
                false
            }
        }
    }

    /// Builds an AND over the operands pushed since `begin`, merging
    /// nested ANDs, folding constants, and dropping/cancelling
    /// duplicate or complementary operands.
    pub fn and_op(&mut self, begin: usize) -> Expr {
        Expr::from_node(self.and_op_node(begin))
    }

    fn and_op_node(&mut self, begin: usize) -> Rc<Node> {
        debug_assert!(begin <= self.stack.len());
        let mut const0 = false;
        self.scratch.clear();
        'outer: for i in begin..self.stack.len() {
            let node = Rc::clone(&self.stack[i]);
            match node.as_ref() {
                Node::Const0 => {
                    const0 = true;
                    break 'outer;
                }
                Node::And(operands) => {
                    for opr in operands.iter() {
                        if self.check_node(opr) {
                            const0 = true;
                            break 'outer;
                        }
                    }
                }
                Node::Const1 => {}
                _ => {
                    if self.check_node(&node) {
                        const0 = true;
                        break 'outer;
                    }
                }
            }
        }
        self.pop_to(begin);

        if const0 {
            return Rc::new(Node::Const0);
        }
        match self.scratch.len() {
            0 => Rc::new(Node::Const1),
            1 => self.scratch[0].clone(),
            _ => Rc::new(Node::And(self.scratch.drain(..).collect())),
        }
    }

    /// Builds an OR over the operands pushed since `begin`.
    pub fn or_op(&mut self, begin: usize) -> Expr {
        Expr::from_node(self.or_op_node(begin))
    }

    fn or_op_node(&mut self, begin: usize) -> Rc<Node> {
        debug_assert!(begin <= self.stack.len());
        let mut const1 = false;
        self.scratch.clear();
        'outer: for i in begin..self.stack.len() {
            let node = Rc::clone(&self.stack[i]);
            match node.as_ref() {
                Node::Const1 => {
                    const1 = true;
                    break 'outer;
                }
                Node::Or(operands) => {
                    for opr in operands.iter() {
                        if self.check_node(opr) {
                            const1 = true;
                            break 'outer;
                        }
                    }
                }
                Node::Const0 => {}
                _ => {
                    if self.check_node(&node) {
                        const1 = true;
                        break 'outer;
                    }
                }
            }
        }
        self.pop_to(begin);

        if const1 {
            return Rc::new(Node::Const1);
        }
        match self.scratch.len() {
            0 => Rc::new(Node::Const0),
            1 => self.scratch[0].clone(),
            _ => Rc::new(Node::Or(self.scratch.drain(..).collect())),
        }
    }

    /// Builds an XOR over the operands pushed since `begin`.
    pub fn xor_op(&mut self, begin: usize) -> Expr {
        Expr::from_node(self.xor_op_node(begin))
    }

    fn xor_op_node(&mut self, begin: usize) -> Rc<Node> {
        debug_assert!(begin <= self.stack.len());
        let mut inv = false;
        self.scratch.clear();
        for i in begin..self.stack.len() {
            let node = Rc::clone(&self.stack[i]);
            match node.as_ref() {
                Node::Const1 => inv = !inv,
                Node::Xor(operands) => {
                    for opr in operands.iter() {
                        if self.check_node2(opr) {
                            inv = !inv;
                        }
                    }
                }
                Node::Const0 => {}
                _ => {
                    if self.check_node2(&node) {
                        inv = !inv;
                    }
                }
            }
        }
        self.pop_to(begin);

        let node = match self.scratch.len() {
            0 => Rc::new(Node::Const0),
            1 => self.scratch[0].clone(),
            _ => Rc::new(Node::Xor(self.scratch.drain(..).collect())),
        };
        if inv {
            self.complement_node(&node)
        } else {
            node
        }
    }

    /// Returns the dual (negation) of `expr`.
    pub fn complement(&mut self, expr: &Expr) -> Expr {
        Expr::from_node(self.complement_node(expr.node()))
    }

    fn complement_node(&mut self, node: &Rc<Node>) -> Rc<Node> {
        match node.as_ref() {
            Node::Const0 => return Rc::new(Node::Const1),
            Node::Const1 => return Rc::new(Node::Const0),
            Node::PosLit(v) => return Rc::new(Node::NegLit(*v)),
            Node::NegLit(v) => return Rc::new(Node::PosLit(*v)),
            _ => {}
        }

        let begin = self.stack.len();
        let is_xor = node.is_xor();
        for (i, opr) in node.operands().iter().enumerate() {
            let new_opr = if !is_xor || i == 0 {
                self.complement_node(opr)
            } else {
                Rc::clone(opr)
            };
            self.stack.push(new_opr);
        }

        match node.as_ref() {
            Node::And(_) => self.or_op_node(begin),
            Node::Or(_) => self.and_op_node(begin),
            Node::Xor(_) => self.xor_op_node(begin),
            _ => unreachable!("non-operator nodes are returned above"),
        }
    }

    /// Replaces every occurrence of `varid` in `expr` with `sub`.
    /// Literals inside `sub` are left untouched (no expansion).
    pub fn compose(&mut self, expr: &Expr, varid: VarId, sub: &Expr) -> Expr {
        Expr::from_node(self.compose_node(expr.node(), varid, sub.node()))
    }

    fn compose_node(&mut self, node: &Rc<Node>, varid: VarId, sub: &Rc<Node>) -> Rc<Node> {
        match node.as_ref() {
            Node::Const0 | Node::Const1 => return Rc::clone(node),
            Node::PosLit(v) => {
                return if *v == varid { Rc::clone(sub) } else { Rc::clone(node) };
            }
            Node::NegLit(v) => {
                return if *v == varid {
                    self.complement_node(sub)
                } else {
                    Rc::clone(node)
                };
            }
            _ => {}
        }

        let begin = self.stack.len();
        let mut ident = true;
        for opr in node.operands() {
            let new_opr = self.compose_node(opr, varid, sub);
            if !Rc::ptr_eq(&new_opr, opr) {
                ident = false;
            }
            self.stack.push(new_opr);
        }
        if ident {
            self.pop_to(begin);
            return Rc::clone(node);
        }

        match node.as_ref() {
            Node::And(_) => self.and_op_node(begin),
            Node::Or(_) => self.or_op_node(begin),
            Node::Xor(_) => self.xor_op_node(begin),
            _ => unreachable!("non-operator nodes are returned above"),
        }
    }

    /// Replaces every variable in `expr` that appears as a key in `map`
    /// with the corresponding expression, all in one pass.
    pub fn compose_map(&mut self, expr: &Expr, map: &IndexMap<VarId, Expr>) -> Expr {
        let node_map: IndexMap<VarId, Rc<Node>> =
            map.iter().map(|(k, v)| (*k, Rc::clone(v.node()))).collect();
        Expr::from_node(self.compose_map_node(expr.node(), &node_map))
    }

    fn compose_map_node(&mut self, node: &Rc<Node>, map: &IndexMap<VarId, Rc<Node>>) -> Rc<Node> {
        match node.as_ref() {
            Node::Const0 | Node::Const1 => return Rc::clone(node),
            Node::PosLit(v) => {
                return match map.get(v) {
                    Some(sub) => Rc::clone(sub),
                    None => Rc::clone(node),
                };
            }
            Node::NegLit(v) => {
                return match map.get(v) {
                    Some(sub) => self.complement_node(sub),
                    None => Rc::clone(node),
                };
            }
            _ => {}
        }

        let begin = self.stack.len();
        let mut ident = true;
        for opr in node.operands() {
            let new_opr = self.compose_map_node(opr, map);
            if !Rc::ptr_eq(&new_opr, opr) {
                ident = false;
            }
            self.stack.push(new_opr);
        }
        if ident {
            self.pop_to(begin);
            return Rc::clone(node);
        }

        match node.as_ref() {
            Node::And(_) => self.and_op_node(begin),
            Node::Or(_) => self.or_op_node(begin),
            Node::Xor(_) => self.xor_op_node(begin),
            _ => unreachable!("non-operator nodes are returned above"),
        }
    }

    /// Renumbers variables in `expr` according to `map`, leaving
    /// variables not present in `map` untouched.
    pub fn remap_var(&mut self, expr: &Expr, map: &IndexMap<VarId, VarId>) -> Expr {
        Expr::from_node(self.remap_var_node(expr.node(), map))
    }

    fn remap_var_node(&mut self, node: &Rc<Node>, map: &IndexMap<VarId, VarId>) -> Rc<Node> {
        match node.as_ref() {
            Node::Const0 | Node::Const1 => return Rc::clone(node),
            Node::PosLit(v) => {
                return match map.get(v) {
                    Some(new_v) => Rc::new(Node::PosLit(*new_v)),
                    None => Rc::clone(node),
                };
            }
            Node::NegLit(v) => {
                return match map.get(v) {
                    Some(new_v) => Rc::new(Node::NegLit(*new_v)),
                    None => Rc::clone(node),
                };
            }
            _ => {}
        }

        let begin = self.stack.len();
        let mut ident = true;
        for opr in node.operands() {
            let new_opr = self.remap_var_node(opr, map);
            if !Rc::ptr_eq(&new_opr, opr) {
                ident = false;
            }
            self.stack.push(new_opr);
        }
        if ident {
            self.pop_to(begin);
            return Rc::clone(node);
        }

        match node.as_ref() {
            Node::And(_) => self.and_op_node(begin),
            Node::Or(_) => self.or_op_node(begin),
            Node::Xor(_) => self.xor_op_node(begin),
            _ => unreachable!("non-operator nodes are returned above"),
        }
    }

    /// Re-runs canonicalization over `expr`'s whole tree. Only useful
    /// after building a tree through a path that bypassed `and_op`/
    /// `or_op`/`xor_op` (the parsers in `serialize` don't need this --
    /// they already flow through those methods).
    pub fn simplify(&mut self, expr: &Expr) -> Expr {
        Expr::from_node(self.simplify_node(expr.node()))
    }

    fn simplify_node(&mut self, node: &Rc<Node>) -> Rc<Node> {
        if !node.is_op() {
            return Rc::clone(node);
        }
        let begin = self.stack.len();
        let mut ident = true;
        for opr in node.operands() {
            let new_opr = self.simplify_node(opr);
            if !Rc::ptr_eq(&new_opr, opr) {
                ident = false;
            }
            self.stack.push(new_opr);
        }
        if ident {
            self.pop_to(begin);
            return Rc::clone(node);
        }

        match node.as_ref() {
            Node::And(_) => self.and_op_node(begin),
            Node::Or(_) => self.or_op_node(begin),
            Node::Xor(_) => self.xor_op_node(begin),
            _ => unreachable!("non-operator nodes are returned above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VarId {
        VarId::new(i)
    }

    #[test]
    fn and_op_merges_nested_and() {
        let mut f = ExprFactory::new();
        let inner = {
            let begin = f.top();
            f.push(Expr::posi_literal(v(0)));
            f.push(Expr::posi_literal(v(1)));
            f.and_op(begin)
        };
        let begin = f.top();
        f.push(inner);
        f.push(Expr::posi_literal(v(2)));
        let merged = f.and_op(begin);
        assert_eq!(merged.operand_count(), 3);
    }

    #[test]
    fn and_op_folds_const0() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::zero());
        assert!(f.and_op(begin).is_zero());
    }

    #[test]
    fn and_op_cancels_complement() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::nega_literal(v(0)));
        assert!(f.and_op(begin).is_zero());
    }

    #[test]
    fn or_op_dedups_duplicate_operand() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::posi_literal(v(0)));
        let result = f.or_op(begin);
        assert!(result.is_literal());
    }

    #[test]
    fn xor_op_cancels_duplicate_pair() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::posi_literal(v(0)));
        assert!(f.xor_op(begin).is_zero());
    }

    #[test]
    fn xor_op_cancels_complement_pair_to_one() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::nega_literal(v(0)));
        assert!(f.xor_op(begin).is_one());
    }

    #[test]
    fn complement_is_involution() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::posi_literal(v(1)));
        let e = f.and_op(begin);
        let not_e = f.complement(&e);
        let not_not_e = f.complement(&not_e);
        assert_eq!(e, not_not_e);
    }

    #[test]
    fn compose_substitutes_literal() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(v(0)));
        f.push(Expr::posi_literal(v(1)));
        let e = f.and_op(begin);
        let sub = Expr::zero();
        let composed = f.compose(&e, v(0), &sub);
        assert!(composed.is_zero());
    }
}

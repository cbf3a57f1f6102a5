//! Structural equivalence between canonical node trees.
//!
//! These are the hot-path primitives the factory's `check_node`/
//! `check_node2` call on every AND/OR/XOR construction, so they walk
//! `Node` directly and never allocate.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::node::Node;

/// True when `a` and `b` represent the same Boolean function: same
/// shape, same operand order, same literals.
pub(crate) fn posi_equiv(a: &Rc<Node>, b: &Rc<Node>) -> bool {
    match (a.as_ref(), b.as_ref()) {
        (Node::Const0, Node::Const0) | (Node::Const1, Node::Const1) => true,
        (Node::PosLit(v0), Node::PosLit(v1)) | (Node::NegLit(v0), Node::NegLit(v1)) => v0 == v1,
        (Node::And(o0), Node::And(o1))
        | (Node::Or(o0), Node::Or(o1))
        | (Node::Xor(o0), Node::Xor(o1)) => {
            o0.len() == o1.len() && o0.iter().zip(o1.iter()).all(|(x, y)| posi_equiv(x, y))
        }
        _ => false,
    }
}

/// True when `a` and `b` are structural complements of each other.
///
/// Const0/Const1 complement each other and a positive/negative literal
/// pair over the same variable complement each other; AND and OR
/// complement operand-for-operand (De Morgan); XOR complements when an
/// odd number of its operand pairs are themselves complements.
pub(crate) fn nega_equiv(a: &Rc<Node>, b: &Rc<Node>) -> bool {
    match (a.as_ref(), b.as_ref()) {
        (Node::Const0, Node::Const1) | (Node::Const1, Node::Const0) => true,
        (Node::PosLit(v0), Node::NegLit(v1)) | (Node::NegLit(v0), Node::PosLit(v1)) => v0 == v1,
        (Node::And(o0), Node::Or(o1)) | (Node::Or(o0), Node::And(o1)) => {
            o0.len() == o1.len() && o0.iter().zip(o1.iter()).all(|(x, y)| nega_equiv(x, y))
        }
        (Node::Xor(o0), Node::Xor(o1)) => {
            if o0.len() != o1.len() {
                return false;
            }
            let mut inv = false;
            for (x, y) in o0.iter().zip(o1.iter()) {
                if nega_equiv(x, y) {
                    inv = !inv;
                } else if !posi_equiv(x, y) {
                    return false;
                }
            }
            inv
        }
        _ => false,
    }
}

/// Hashes `node` consistently with [`posi_equiv`].
pub(crate) fn hash_node<H: Hasher>(node: &Node, state: &mut H) {
    match node {
        Node::Const0 => 0u8.hash(state),
        Node::Const1 => 1u8.hash(state),
        Node::PosLit(v) => {
            2u8.hash(state);
            v.hash(state);
        }
        Node::NegLit(v) => {
            3u8.hash(state);
            v.hash(state);
        }
        Node::And(ops) => hash_ops(4u8, ops, state),
        Node::Or(ops) => hash_ops(5u8, ops, state),
        Node::Xor(ops) => hash_ops(6u8, ops, state),
    }
}

fn hash_ops<H: Hasher>(tag: u8, ops: &[Rc<Node>], state: &mut H) {
    tag.hash(state);
    ops.len().hash(state);
    for o in ops {
        hash_node(o, state);
    }
}

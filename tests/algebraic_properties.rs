//! Property-based tests for the algebraic laws a canonical factored-form
//! expression must satisfy, regardless of how it was built.

use boolexpr::{Expr, ExprFactory, VarId};
use indexmap::IndexMap;
use proptest::prelude::*;

const MAX_VAR: u32 = 4;

fn var_id() -> impl Strategy<Value = VarId> {
    (0..MAX_VAR).prop_map(VarId::new)
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        Just(Expr::zero()),
        Just(Expr::one()),
        var_id().prop_map(Expr::posi_literal),
        var_id().prop_map(Expr::nega_literal),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 2..4)
                .prop_map(|v| Expr::and_of(&v)),
            proptest::collection::vec(inner.clone(), 2..4)
                .prop_map(|v| Expr::or_of(&v)),
            proptest::collection::vec(inner, 2..4).prop_map(|v| Expr::xor_of(&v)),
        ]
    })
}

proptest! {
    #[test]
    fn double_negation_is_identity(e in expr_strategy()) {
        prop_assert_eq!(!(!e.clone()), e);
    }

    #[test]
    fn and_or_xor_are_idempotent_or_self_cancelling(e in expr_strategy()) {
        prop_assert_eq!(e.clone() & e.clone(), e.clone());
        prop_assert_eq!(e.clone() | e.clone(), e.clone());
        prop_assert!((e.clone() ^ e).is_zero());
    }

    #[test]
    fn operand_and_its_complement_cancel(e in expr_strategy()) {
        let not_e = !e.clone();
        prop_assert!((e.clone() & not_e.clone()).is_zero());
        prop_assert!((e.clone() | not_e.clone()).is_one());
        prop_assert!((e & not_e).is_one());
    }

    #[test]
    fn identity_and_annihilator_constants(e in expr_strategy()) {
        prop_assert_eq!(e.clone() & Expr::one(), e.clone());
        prop_assert_eq!(e.clone() | Expr::zero(), e.clone());
        prop_assert_eq!(e.clone() ^ Expr::zero(), e.clone());
        prop_assert!((e.clone() & Expr::zero()).is_zero());
        prop_assert!((e.clone() | Expr::one()).is_one());
        prop_assert_eq!(e.clone() ^ Expr::one(), !e);
    }

    #[test]
    fn and_or_xor_are_commutative(a in expr_strategy(), b in expr_strategy()) {
        prop_assert_eq!(a.clone() & b.clone(), b.clone() & a.clone());
        prop_assert_eq!(a.clone() | b.clone(), b.clone() | a.clone());
        prop_assert_eq!(a.clone() ^ b.clone(), b ^ a);
    }

    #[test]
    fn and_or_xor_are_associative(a in expr_strategy(), b in expr_strategy(), c in expr_strategy()) {
        prop_assert_eq!((a.clone() & b.clone()) & c.clone(), a.clone() & (b.clone() & c.clone()));
        prop_assert_eq!((a.clone() | b.clone()) | c.clone(), a.clone() | (b.clone() | c.clone()));
        prop_assert_eq!((a.clone() ^ b.clone()) ^ c.clone(), a ^ (b ^ c));
    }

    #[test]
    fn de_morgan_holds_for_and_and_or(a in expr_strategy(), b in expr_strategy()) {
        prop_assert_eq!(!(a.clone() & b.clone()), !a.clone() | !b.clone());
        prop_assert_eq!(!(a.clone() | b.clone()), !a | !b);
    }

    #[test]
    fn compose_with_matching_positive_literal_is_identity(e in expr_strategy(), v in var_id()) {
        let mut f = ExprFactory::new();
        let sub = Expr::posi_literal(v);
        prop_assert_eq!(f.compose(&e, v, &sub), e);
    }

    #[test]
    fn remap_var_with_identity_map_is_identity(e in expr_strategy()) {
        let mut f = ExprFactory::new();
        let map: IndexMap<VarId, VarId> =
            (0..MAX_VAR).map(|i| (VarId::new(i), VarId::new(i))).collect();
        prop_assert_eq!(f.remap_var(&e, &map), e);
    }

    #[test]
    fn rep_string_roundtrips(e in expr_strategy()) {
        prop_assert_eq!(Expr::from_rep_string(&e.rep_string()).unwrap(), e);
    }

    #[test]
    fn binary_roundtrips(e in expr_strategy()) {
        prop_assert_eq!(Expr::restore(&e.dump()).unwrap(), e);
    }

    #[test]
    fn eval_matches_operand_fold_for_and(a in var_id(), b in var_id()) {
        let e = Expr::posi_literal(a) & Expr::posi_literal(b);
        for bits in 0u64..4 {
            let mut vals = vec![0u64; MAX_VAR as usize];
            vals[a.index() as usize] = bits & 0b01;
            vals[b.index() as usize] = (bits & 0b10) >> 1;
            let expected = vals[a.index() as usize] & vals[b.index() as usize];
            prop_assert_eq!(e.eval(&vals, 1).unwrap(), expected);
        }
    }
}

#[test]
fn no_operand_of_and_or_is_a_constant_after_construction() {
    let mut f = ExprFactory::new();
    let begin = f.top();
    f.push(Expr::posi_literal(VarId::new(0)));
    f.push(Expr::one());
    let e = f.and_op(begin);
    // Const1 absorbs into the identity, leaving the bare literal -- not
    // an And node with a constant operand.
    assert!(e.is_positive_literal());
}

#[test]
fn flattening_merges_same_kind_operators_into_one_node() {
    let mut f = ExprFactory::new();
    let begin = f.top();
    f.push(Expr::posi_literal(VarId::new(0)));
    f.push(Expr::posi_literal(VarId::new(1)));
    let inner = f.and_op(begin);
    let begin = f.top();
    f.push(inner);
    f.push(Expr::posi_literal(VarId::new(2)));
    let flat = f.and_op(begin);
    assert_eq!(flat.operand_count(), 3);
    for o in flat.operand_list() {
        assert!(!o.is_and());
    }
}

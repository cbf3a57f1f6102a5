//! Snapshot tests pinning the exact textual output of the rep-string and
//! infix serializers for a handful of representative expressions.

use boolexpr::{Expr, ExprFactory, VarId};

fn v(i: u32) -> VarId {
    VarId::new(i)
}

#[test]
fn rep_string_snapshots() {
    insta::assert_snapshot!(Expr::zero().rep_string(), @"C0");
    insta::assert_snapshot!(Expr::one().rep_string(), @"C1");
    insta::assert_snapshot!(Expr::posi_literal(v(3)).rep_string(), @"P3");
    insta::assert_snapshot!(Expr::nega_literal(v(3)).rep_string(), @"N3");

    let mut f = ExprFactory::new();
    let begin = f.top();
    f.push(Expr::posi_literal(v(0)));
    f.push(Expr::nega_literal(v(1)));
    f.push(Expr::posi_literal(v(2)));
    let and3 = f.and_op(begin);
    insta::assert_snapshot!(and3.rep_string(), @"A3P0N1P2");

    let begin = f.top();
    f.push(and3);
    f.push(Expr::posi_literal(v(4)));
    let xor = f.xor_op(begin);
    insta::assert_snapshot!(xor.rep_string(), @"X2A3P0N1P2P4");
}

#[test]
fn infix_display_snapshots() {
    insta::assert_snapshot!(Expr::zero().to_string(), @"0");
    insta::assert_snapshot!(Expr::posi_literal(v(5)).to_string(), @"5");
    insta::assert_snapshot!(Expr::nega_literal(v(5)).to_string(), @"~5");

    let mut f = ExprFactory::new();
    let begin = f.top();
    f.push(Expr::posi_literal(v(0)));
    f.push(Expr::posi_literal(v(1)));
    f.push(Expr::nega_literal(v(2)));
    let or3 = f.or_op(begin);
    insta::assert_snapshot!(or3.to_string(), @"( 0 | 1 | ~2 )");
}

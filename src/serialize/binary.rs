//! Compact binary encoding: a one-byte node-kind tag, with `PosLit`/
//! `NegLit` followed by a `u32` variable id and `And`/`Or`/`Xor` followed
//! by a `u32` operand count then that many encoded operands.
//! `Const0`/`Const1` carry no payload. An invalid [`Expr`] encodes as the
//! lone tag 255.

use crate::error::BoolExprError;
use crate::factory::ExprFactory;
use crate::handle::Expr;
use crate::id::VarId;

const TAG_CONST0: u8 = 0;
const TAG_CONST1: u8 = 1;
const TAG_POS_LIT: u8 = 2;
const TAG_NEG_LIT: u8 = 3;
const TAG_AND: u8 = 4;
const TAG_OR: u8 = 5;
const TAG_XOR: u8 = 6;
const TAG_INVALID: u8 = 255;

/// Serializes `expr` to its binary form.
pub(crate) fn write(expr: &Expr) -> Vec<u8> {
    let mut out = Vec::new();
    write_inner(expr, &mut out);
    out
}

fn write_inner(expr: &Expr, out: &mut Vec<u8>) {
    if expr.is_invalid() {
        out.push(TAG_INVALID);
    } else if expr.is_zero() {
        out.push(TAG_CONST0);
    } else if expr.is_one() {
        out.push(TAG_CONST1);
    } else if expr.is_positive_literal() {
        out.push(TAG_POS_LIT);
        out.extend_from_slice(&expr.varid().index().to_le_bytes());
    } else if expr.is_negative_literal() {
        out.push(TAG_NEG_LIT);
        out.extend_from_slice(&expr.varid().index().to_le_bytes());
    } else {
        let ops = expr.operand_list();
        out.push(if expr.is_and() {
            TAG_AND
        } else if expr.is_or() {
            TAG_OR
        } else {
            TAG_XOR
        });
        out.extend_from_slice(&(ops.len() as u32).to_le_bytes());
        for o in &ops {
            write_inner(&o, out);
        }
    }
}

/// Parses a binary encoding produced by [`write`].
pub(crate) fn read(bytes: &[u8]) -> Result<Expr, BoolExprError> {
    let mut pos = 0usize;
    let mut factory = ExprFactory::new();
    let e = read_node(bytes, &mut pos, &mut factory)?;
    if pos != bytes.len() {
        return Err(BoolExprError::MalformedBinary("trailing bytes after a complete expression"));
    }
    Ok(e)
}

fn read_u32(bytes: &[u8], pos: &mut usize) -> Result<u32, BoolExprError> {
    let end = *pos + 4;
    let slice = bytes
        .get(*pos..end)
        .ok_or(BoolExprError::MalformedBinary("truncated payload"))?;
    *pos = end;
    Ok(u32::from_le_bytes(slice.try_into().expect("slice has exactly 4 bytes")))
}

fn read_node(bytes: &[u8], pos: &mut usize, factory: &mut ExprFactory) -> Result<Expr, BoolExprError> {
    let tag = *bytes.get(*pos).ok_or(BoolExprError::MalformedBinary("truncated tag"))?;
    *pos += 1;
    match tag {
        TAG_INVALID => Ok(Expr::invalid()),
        TAG_CONST0 => Ok(Expr::zero()),
        TAG_CONST1 => Ok(Expr::one()),
        TAG_POS_LIT => Ok(Expr::posi_literal(VarId::new(read_u32(bytes, pos)?))),
        TAG_NEG_LIT => Ok(Expr::nega_literal(VarId::new(read_u32(bytes, pos)?))),
        TAG_AND | TAG_OR | TAG_XOR => {
            let n = read_u32(bytes, pos)?;
            let begin = factory.top();
            for _ in 0..n {
                let operand = read_node(bytes, pos, factory)?;
                factory.push(operand);
            }
            Ok(match tag {
                TAG_AND => factory.and_op(begin),
                TAG_OR => factory.or_op(begin),
                _ => factory.xor_op(begin),
            })
        }
        _ => Err(BoolExprError::MalformedBinary("unknown node tag")),
    }
}

//! The canonical rep-string form: a prefix-tagged, fully round-trip-safe
//! textual encoding. Every node kind has its own one-letter tag followed
//! by any fixed fields, then its operands recursively:
//!
//! - `C0`, `C1` -- constants
//! - `P<var>`, `N<var>` -- positive/negative literal
//! - `A<n><op>...<op>`, `O<n>...`, `X<n>...` -- AND/OR/XOR of `n` operands
//!
//! This is the only form that can represent every expression this crate
//! can build, including XOR.

use crate::error::BoolExprError;
use crate::factory::ExprFactory;
use crate::handle::Expr;
use crate::id::VarId;

/// Serializes `expr` to its rep-string form. The invalid `Expr` writes
/// as the empty string.
pub(crate) fn write(expr: &Expr) -> String {
    if expr.is_invalid() {
        return String::new();
    }
    let mut s = String::new();
    write_inner(expr, &mut s);
    s
}

fn write_inner(expr: &Expr, out: &mut String) {
    if expr.is_zero() {
        out.push_str("C0");
    } else if expr.is_one() {
        out.push_str("C1");
    } else if expr.is_positive_literal() {
        out.push('P');
        out.push_str(&expr.varid().index().to_string());
    } else if expr.is_negative_literal() {
        out.push('N');
        out.push_str(&expr.varid().index().to_string());
    } else {
        let ops = expr.operand_list();
        out.push(if expr.is_and() {
            'A'
        } else if expr.is_or() {
            'O'
        } else {
            'X'
        });
        out.push_str(&ops.len().to_string());
        for o in &ops {
            write_inner(&o, out);
        }
    }
}

/// Parses a rep-string produced by [`write`]. The empty string parses
/// back to the invalid `Expr`.
pub(crate) fn parse(s: &str) -> Result<Expr, BoolExprError> {
    if s.is_empty() {
        return Ok(Expr::invalid());
    }
    let chars: Vec<char> = s.chars().collect();
    let mut cursor = Cursor { chars: &chars, pos: 0 };
    let mut factory = ExprFactory::new();
    let e = parse_node(&mut cursor, &mut factory)?;
    if cursor.pos != cursor.chars.len() {
        return Err(BoolExprError::UnexpectedChar(cursor.chars[cursor.pos]));
    }
    Ok(e)
}

struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn read_char(&mut self) -> Result<char, BoolExprError> {
        let c = *self.chars.get(self.pos).ok_or(BoolExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(c)
    }

    fn read_uint(&mut self) -> Result<u32, BoolExprError> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(&c) = self.chars.get(self.pos) {
            if let Some(d) = c.to_digit(10) {
                value = value * 10 + d;
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(BoolExprError::UnexpectedEnd);
        }
        Ok(value)
    }
}

fn parse_node(cursor: &mut Cursor<'_>, factory: &mut ExprFactory) -> Result<Expr, BoolExprError> {
    let tag = cursor.read_char()?;
    match tag {
        'C' => {
            let n = cursor.read_uint()?;
            match n {
                0 => Ok(Expr::zero()),
                1 => Ok(Expr::one()),
                _ => Err(BoolExprError::UnknownTag('C')),
            }
        }
        'P' => Ok(Expr::posi_literal(VarId::new(cursor.read_uint()?))),
        'N' => Ok(Expr::nega_literal(VarId::new(cursor.read_uint()?))),
        'A' | 'O' | 'X' => {
            let n = cursor.read_uint()? as usize;
            let begin = factory.top();
            for _ in 0..n {
                let operand = parse_node(cursor, factory)?;
                factory.push(operand);
            }
            Ok(match tag {
                'A' => factory.and_op(begin),
                'O' => factory.or_op(begin),
                _ => factory.xor_op(begin),
            })
        }
        other => Err(BoolExprError::UnknownTag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_roundtrip() {
        assert_eq!(write(&Expr::zero()), "C0");
        assert_eq!(write(&Expr::one()), "C1");
        assert_eq!(parse("C0").unwrap(), Expr::zero());
        assert_eq!(parse("C1").unwrap(), Expr::one());
    }

    #[test]
    fn literal_roundtrips() {
        let e = Expr::nega_literal(VarId::new(7));
        let s = write(&e);
        assert_eq!(s, "N7");
        assert_eq!(parse(&s).unwrap(), e);
    }

    #[test]
    fn and_of_literals_roundtrips() {
        let mut f = ExprFactory::new();
        let begin = f.top();
        f.push(Expr::posi_literal(VarId::new(0)));
        f.push(Expr::nega_literal(VarId::new(1)));
        let e = f.and_op(begin);
        let s = write(&e);
        assert_eq!(parse(&s).unwrap(), e);
    }

    #[test]
    fn empty_string_is_invalid() {
        assert_eq!(write(&Expr::invalid()), "");
        assert!(parse("").unwrap().is_invalid());
    }

    #[test]
    fn unknown_tag_errors() {
        assert!(matches!(parse("Z0"), Err(BoolExprError::UnknownTag('Z'))));
    }

    #[test]
    fn trailing_garbage_errors() {
        assert!(parse("C0C0").is_err());
    }
}

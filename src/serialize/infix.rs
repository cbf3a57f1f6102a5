//! Human-readable infix form.
//!
//! ```text
//! Expr := Prod ( ('|' | '+') Prod )*       -- OR
//! Prod := Atom ( ('&' | '*')? Atom )*      -- AND, also implicit by juxtaposition
//! Atom := '~' Atom | '!' Atom              -- NOT
//!       | '(' Expr ')'
//!       | digits                           -- variable id -> positive literal
//! ```
//!
//! The parser only understands AND/OR/NOT -- XOR must go through
//! [`crate::Expr::rep_string`]/[`crate::Expr::from_rep_string`]. Bare
//! digit runs always denote a variable id, never the constants 0/1 --
//! construct those with [`crate::Expr::zero`]/[`crate::Expr::one`], or
//! parse `"C0"`/`"C1"` as a rep-string.

use std::fmt;

use crate::error::BoolExprError;
use crate::factory::ExprFactory;
use crate::handle::Expr;
use crate::id::VarId;

/// Writes `expr` in infix form to `f`.
pub(crate) fn write(expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if expr.is_invalid() {
        return write!(f, "<invalid>");
    }
    if expr.is_zero() {
        return write!(f, "0");
    }
    if expr.is_one() {
        return write!(f, "1");
    }
    if expr.is_positive_literal() {
        return write!(f, "{}", expr.varid());
    }
    if expr.is_negative_literal() {
        return write!(f, "~{}", expr.varid());
    }

    let op = if expr.is_and() {
        " & "
    } else if expr.is_or() {
        " | "
    } else {
        " ^ "
    };
    write!(f, "( ")?;
    for (i, o) in expr.operand_list().iter().enumerate() {
        if i > 0 {
            write!(f, "{op}")?;
        }
        write(o, f)?;
    }
    write!(f, " )")
}

/// Parses an infix-form expression. XOR (`^`) is not recognized.
pub(crate) fn parse(s: &str) -> Result<Expr, BoolExprError> {
    let chars: Vec<char> = s.chars().collect();
    let mut p = Parser { chars: &chars, pos: 0, factory: ExprFactory::new() };
    let e = p.parse_expr()?;
    p.skip_ws();
    if p.pos != p.chars.len() {
        return Err(if p.chars[p.pos] == '^' {
            BoolExprError::XorNotInfix
        } else {
            BoolExprError::UnexpectedChar(p.chars[p.pos])
        });
    }
    Ok(e)
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
    factory: ExprFactory,
}

impl<'a> Parser<'a> {
    fn skip_ws(&mut self) {
        while matches!(self.chars.get(self.pos), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.skip_ws();
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<(), BoolExprError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(BoolExprError::UnexpectedChar(c)),
            None => Err(BoolExprError::UnexpectedEnd),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, BoolExprError> {
        let mut terms = vec![self.parse_prod()?];
        while matches!(self.peek(), Some('|') | Some('+')) {
            self.bump();
            terms.push(self.parse_prod()?);
        }
        if terms.len() == 1 {
            return Ok(terms.pop().expect("just checked len == 1"));
        }
        let begin = self.factory.top();
        for t in terms {
            self.factory.push(t);
        }
        Ok(self.factory.or_op(begin))
    }

    fn parse_prod(&mut self) -> Result<Expr, BoolExprError> {
        let mut factors = vec![self.parse_atom()?];
        loop {
            match self.peek() {
                Some('&') | Some('*') => {
                    self.bump();
                    factors.push(self.parse_atom()?);
                }
                Some(c) if c == '~' || c == '!' || c == '(' || c.is_ascii_digit() => {
                    factors.push(self.parse_atom()?);
                }
                _ => break,
            }
        }
        if factors.len() == 1 {
            return Ok(factors.pop().expect("just checked len == 1"));
        }
        let begin = self.factory.top();
        for t in factors {
            self.factory.push(t);
        }
        Ok(self.factory.and_op(begin))
    }

    fn parse_atom(&mut self) -> Result<Expr, BoolExprError> {
        match self.peek().ok_or(BoolExprError::UnexpectedEnd)? {
            '~' | '!' => {
                self.bump();
                let inner = self.parse_atom()?;
                Ok(self.factory.complement(&inner))
            }
            '(' => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(')')?;
                Ok(inner)
            }
            c if c.is_ascii_digit() => {
                let mut value: u32 = 0;
                loop {
                    match self.chars.get(self.pos) {
                        Some(d) if d.is_ascii_digit() => {
                            value = value * 10 + d.to_digit(10).expect("ascii digit");
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                Ok(Expr::posi_literal(VarId::new(value)))
            }
            '^' => Err(BoolExprError::XorNotInfix),
            c => Err(BoolExprError::UnexpectedChar(c)),
        }
    }
}

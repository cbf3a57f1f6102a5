//! Error types for the boolexpr crate.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! every user-observable failure mode: malformed input to one of the
//! three parsers, an out-of-range operand index, and a value vector
//! too short for `eval`. Internal invariant violations (a canonicalized
//! node with an operator tag that doesn't match its operand shape) are
//! programmer errors, not part of this enum -- they `debug_assert!` or
//! `unreachable!` instead.

use thiserror::Error;

/// Errors produced by the boolexpr crate's public API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoolExprError {
    /// A parser ran out of input before finding a complete expression.
    #[error("unexpected end of input while parsing an expression")]
    UnexpectedEnd,

    /// A parser found a character it didn't expect.
    #[error("unexpected character '{0}' while parsing an expression")]
    UnexpectedChar(char),

    /// `from_rep_string` saw a tag byte it doesn't recognize.
    #[error("unknown rep-string tag '{0}'")]
    UnknownTag(char),

    /// `restore` saw a malformed binary encoding.
    #[error("malformed binary encoding: {0}")]
    MalformedBinary(&'static str),

    /// `from_string` (infix) was asked to parse a `^`; infix form can't
    /// represent XOR, use `rep_string`/`from_rep_string` instead.
    #[error("infix form can't represent xor; use rep_string instead")]
    XorNotInfix,

    /// An operand index was out of range for the node being queried.
    #[error("operand index {index} out of range (node has {len} operands)")]
    OutOfRange { index: usize, len: usize },

    /// `eval` was given fewer values than the expression's input size.
    #[error("value vector has {got} entries, need at least {need}")]
    ArgumentError { need: usize, got: usize },
}

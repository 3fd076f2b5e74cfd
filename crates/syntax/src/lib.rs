//! Front end for the Map Expression Language (MEL).
//!
//! MEL is a small XPath-like language used to select and compute over
//! hierarchical data while mapping one document onto another. This crate turns
//! an expression string into a typed syntax tree, or into the first error with
//! its byte offset. It does not evaluate anything.
//!
//! # Key Types
//!
//! - [`Scanner`]: lazy tokenizer over the source text
//! - [`Expr`]: the parsed expression tree
//! - [`ParseError`]: lexical, syntax and nesting-depth failures
//! - [`ParserConfig`]: nesting limit
//!
//! # Example
//!
//! ```
//! use mel_syntax::{Expr, parse};
//!
//! let ast = parse("/order/item[@sku = 'A1'][1]").unwrap();
//! assert!(matches!(ast.root, Expr::Selector(_)));
//! assert_eq!(ast.to_string(), "/order/item[@sku = 'A1'][1]");
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
mod printer;
pub mod scanner;
pub mod token;

#[cfg(test)]
mod property_tests;

pub use ast::{
    AdditiveOp, Ast, Constant, Expr, FilterBody, FunctionCall, LocalName, MultiplicativeOp,
    Predicate, QName, RelationalOp, Selector, Step,
};
pub use config::ParserConfig;
pub use error::{ErrorKind, ParseError};
pub use parser::{ExpressionParser, parse, parse_with_config};
pub use scanner::{Scanner, scan};
pub use token::{Span, Token, TokenKind};

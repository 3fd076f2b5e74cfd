//! Map Expression Language (MEL).
//!
//! This crate is the public entry point. The scanner, syntax tree and parser
//! live in `mel-syntax` and are re-exported here unchanged.
//!
//! ```
//! use mel::{ExpressionParser, ParserConfig};
//!
//! let parser = ExpressionParser::new(ParserConfig::default().with_max_depth(64));
//! let ast = parser.parse("sum(/order/line/@qty) > 10").unwrap();
//! assert_eq!(ast.root.kind_name(), "comparison");
//! ```

pub use mel_syntax::*;

//! The rule language: a line-oriented source format compiled once at startup
//! into a [`RuleTable`](ruledns_domain::RuleTable).
//!
//! ```text
//! # query                    response
//! A example.com IN        -> A 93.184.216.34 IN
//! TXT example.com IN      -> TXT hello IN
//! A blocked.example IN    -> -
//! ```

pub mod compiler;
pub mod parser;
pub mod tokenizer;

pub use compiler::compile_rules;
pub use parser::{BoxedParser, ParseResult, Parser};
pub use tokenizer::{Token, TokenKind, Tokenizer};

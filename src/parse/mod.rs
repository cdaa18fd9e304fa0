//! Text format for conditional 404 rules.
//!
//! ```text
//! # comments run to the end of the line
//! rule spanish "Spanish pages" (weight 5) -> 20:
//!     /es
//!     /es/*
//!
//! rule outside_admin (weight -3) disabled -> 31:
//!     not "/admin/*"
//! ```
//!
//! The label defaults to the id, the weight to 0, and rules are enabled
//! unless marked `disabled`. Patterns are bare tokens starting with `/`, `*`
//! or `<`, or quoted strings. A leading `not` negates the condition.

mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::ParsedRuleSet;

/// Parse a DSL input string into a [`ParsedRuleSet`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid DSL syntax.
pub fn parse(input: &str) -> Result<ParsedRuleSet, ParseError> {
    use winnow::Parser;
    grammar::parse_ruleset
        .parse(input)
        .map_err(|e| ParseError::at(input, e.offset(), e.inner().to_string()))
}

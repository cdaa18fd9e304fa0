use crate::Rule;

/// The result of parsing a DSL input string, in declaration order.
#[derive(Debug)]
pub struct ParsedRuleSet {
    pub rules: Vec<Rule>,
}

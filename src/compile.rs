use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{CompileError, CompiledRule, PathMatcher, Rule, RuleSet};

pub(crate) fn compile(rules: &[Rule], front_page: &str) -> Result<RuleSet, CompileError> {
    check_ids(rules)?;

    let mut compiled: Vec<CompiledRule> = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| CompiledRule {
            rule: rule.clone(),
            matcher: compile_matcher(rule, front_page),
            index,
        })
        .collect();

    // Highest weight first. `sort_by` is stable, so equal weights keep
    // declaration order.
    compiled.sort_by(|a, b| b.rule.weight.cmp(&a.rule.weight));

    debug!(
        rules = compiled.len(),
        enabled = compiled.iter().filter(|r| r.rule.enabled).count(),
        front_page,
        "compiled conditional 404 rules"
    );

    Ok(RuleSet {
        rules: compiled,
        front_page: front_page.to_owned(),
    })
}

fn check_ids(rules: &[Rule]) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for (position, rule) in rules.iter().enumerate() {
        if rule.id.trim().is_empty() {
            return Err(CompileError::EmptyId { position });
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(CompileError::DuplicateRule {
                id: rule.id.clone(),
            });
        }
    }
    Ok(())
}

/// Compile a rule's path condition. Rules whose condition is empty or cannot
/// be compiled get no matcher and never match.
pub(crate) fn compile_matcher(rule: &Rule, front_page: &str) -> Option<PathMatcher> {
    match PathMatcher::compile(&rule.path_condition, front_page) {
        Ok(Some(matcher)) => Some(matcher),
        Ok(None) => {
            debug!(rule = %rule.id, "rule has no path patterns, skipping");
            None
        }
        Err(err) => {
            warn!(rule = %rule.id, error = %err, "rule path condition failed to compile, skipping");
            None
        }
    }
}

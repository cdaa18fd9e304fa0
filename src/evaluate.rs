use std::cmp::Reverse;
use std::time::Instant;

use tracing::{debug, warn};

use crate::types::DEFAULT_FRONT_PAGE;
use crate::{normalize_path, AliasResolver, CompiledRule, ResolutionReport, Rule};

/// Return the enabled rules whose path condition matches `request_path`, in
/// input order.
///
/// Each rule's condition is compiled on the fly with `<front>` standing for
/// `/`. Rules with an empty or uncompilable condition are skipped. For
/// repeated lookups over the same rules, compile a
/// [`RuleSet`](crate::RuleSet) instead.
#[must_use]
pub fn find_applicable_rules<'r>(request_path: &str, rules: &'r [Rule]) -> Vec<&'r Rule> {
    let path = normalize_path(request_path);
    rules
        .iter()
        .filter(|rule| rule.enabled)
        .filter(|rule| {
            crate::compile::compile_matcher(rule, DEFAULT_FRONT_PAGE)
                .is_some_and(|m| m.matches_normalized(path))
        })
        .collect()
}

/// Pick the highest-weight rule of `matched` and resolve its target page.
///
/// Among rules of equal weight the one that comes first in `matched` wins.
/// Returns `None` when `matched` is empty or the winner's page does not
/// resolve to a non-blank path.
pub fn select_winning_path<A>(matched: &[&Rule], aliases: &A) -> Option<String>
where
    A: AliasResolver + ?Sized,
{
    // `min_by_key` keeps the first of several equal keys.
    let winner = matched.iter().min_by_key(|rule| Reverse(rule.weight))?;
    resolve_target(winner, aliases)
}

/// Resolve a request path against plain rule records in one call.
pub fn resolve<A>(request_path: &str, rules: &[Rule], aliases: &A) -> Option<String>
where
    A: AliasResolver + ?Sized,
{
    let matched = find_applicable_rules(request_path, rules);
    select_winning_path(&matched, aliases)
}

/// Rules are pre-sorted by weight, so the first match is the winner.
pub(crate) fn winner<'r>(rules: &'r [CompiledRule], request_path: &str) -> Option<&'r Rule> {
    let path = normalize_path(request_path);
    rules.iter().find(|r| r.matches(path)).map(|r| &r.rule)
}

pub(crate) fn applicable<'r>(rules: &'r [CompiledRule], request_path: &str) -> Vec<&'r Rule> {
    let path = normalize_path(request_path);
    let mut matched: Vec<&CompiledRule> = rules.iter().filter(|r| r.matches(path)).collect();
    matched.sort_by_key(|r| r.index);
    matched.into_iter().map(|r| &r.rule).collect()
}

pub(crate) fn resolve_detailed<A>(
    rules: &[CompiledRule],
    request_path: &str,
    aliases: &A,
) -> ResolutionReport
where
    A: AliasResolver + ?Sized,
{
    let start = Instant::now();
    let path = normalize_path(request_path);

    let matched: Vec<&Rule> = rules
        .iter()
        .filter(|r| r.matches(path))
        .map(|r| &r.rule)
        .collect();
    let winner = matched.first().copied();
    let resolved = winner.and_then(|rule| resolve_target(rule, aliases));

    let duration = start.elapsed();
    ResolutionReport::new(
        matched.iter().map(|r| r.id.clone()).collect(),
        winner.map(|r| r.id.clone()),
        resolved,
        duration,
    )
}

pub(crate) fn resolve_target<A>(rule: &Rule, aliases: &A) -> Option<String>
where
    A: AliasResolver + ?Sized,
{
    match aliases.resolve_alias(&rule.target_page_id) {
        Some(path) if !path.trim().is_empty() => {
            debug!(rule = %rule.id, page = %rule.target_page_id, %path, "resolved conditional 404 page");
            Some(path)
        }
        _ => {
            warn!(rule = %rule.id, page = %rule.target_page_id, "target page of winning rule did not resolve");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasMap, PathCondition};

    fn foo_rules() -> Vec<Rule> {
        vec![
            Rule::new("a", "10").with_pattern("/foo").with_weight(1),
            Rule::new("b", "20").with_pattern("/foo").with_weight(5),
        ]
    }

    fn ids(rules: &[&Rule]) -> Vec<String> {
        rules.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn reference_example() {
        let rules = foo_rules();
        let matched = find_applicable_rules("/foo", &rules);
        assert_eq!(ids(&matched), vec!["a", "b"]);

        let aliases = AliasMap::new().alias("20", "/node/20-alias");
        assert_eq!(
            select_winning_path(&matched, &aliases).as_deref(),
            Some("/node/20-alias")
        );
    }

    #[test]
    fn no_match_returns_empty() {
        let rules = foo_rules();
        assert!(find_applicable_rules("/bar", &rules).is_empty());
        assert_eq!(resolve("/bar", &rules, &AliasMap::new()), None);
    }

    #[test]
    fn disabled_rule_never_applies() {
        let rules = vec![
            Rule::new("on", "1").with_pattern("/x").with_weight(0),
            Rule::new("off", "2")
                .with_pattern("/x")
                .with_weight(100)
                .with_enabled(false),
        ];
        let matched = find_applicable_rules("/x", &rules);
        assert_eq!(ids(&matched), vec!["on"]);
        assert_eq!(
            resolve("/x", &rules, &AliasMap::new()).as_deref(),
            Some("/node/1")
        );
    }

    #[test]
    fn single_negative_weight_rule_wins() {
        let rules = vec![Rule::new("neg", "3").with_pattern("/x").with_weight(-50)];
        assert_eq!(
            resolve("/x", &rules, &AliasMap::new()).as_deref(),
            Some("/node/3")
        );
    }

    #[test]
    fn equal_weights_first_wins() {
        let rules = vec![
            Rule::new("first", "1").with_pattern("/x").with_weight(2),
            Rule::new("second", "2").with_pattern("/x").with_weight(2),
        ];
        assert_eq!(
            resolve("/x", &rules, &AliasMap::new()).as_deref(),
            Some("/node/1")
        );
    }

    #[test]
    fn empty_condition_is_skipped() {
        let rules = vec![Rule::new("empty", "1").with_condition(PathCondition::default())];
        assert!(find_applicable_rules("/anything", &rules).is_empty());
    }

    #[test]
    fn negated_condition() {
        let rules = vec![Rule::new("not_admin", "1")
            .with_condition(PathCondition::new(["/admin/*"]).negated())];
        assert!(find_applicable_rules("/admin/people", &rules).is_empty());
        assert_eq!(find_applicable_rules("/shop", &rules).len(), 1);
    }

    #[test]
    fn unresolvable_target_is_no_path() {
        let rules = foo_rules();
        let matched = find_applicable_rules("/foo", &rules);
        let nothing = |_: &str| -> Option<String> { None };
        assert_eq!(select_winning_path(&matched, &nothing), None);

        let blank = |_: &str| Some(String::new());
        assert_eq!(select_winning_path(&matched, &blank), None);
    }

    #[test]
    fn winner_lookup_does_not_fall_through() {
        // Only the winner's page is looked up, even when a lower rule would resolve.
        let rules = foo_rules();
        let only_ten = |id: &str| (id == "10").then(|| "/ten".to_owned());
        assert_eq!(resolve("/foo", &rules, &only_ten), None);
    }

    #[test]
    fn empty_matched_set() {
        assert_eq!(select_winning_path(&[], &AliasMap::new()), None);
    }
}

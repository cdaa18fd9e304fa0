use super::pattern::PathMatcher;
#[cfg(feature = "serde")]
use super::record;

/// A set of path patterns deciding which request paths a rule applies to.
///
/// Patterns are matched against the whole request path. `*` matches any run of
/// characters (slashes included) and `<front>` stands for the front page.
/// With `negate` set, the condition holds for every path the patterns do
/// *not* match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCondition {
    #[cfg_attr(
        feature = "serde",
        serde(alias = "pages", deserialize_with = "record::patterns")
    )]
    pub patterns: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub negate: bool,
}

impl PathCondition {
    /// Build a non-negated condition from a list of patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            negate: false,
        }
    }

    /// Parse the one-pattern-per-line text an administrator types into a form.
    #[must_use]
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// True when no pattern carries any content. Such a condition never matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.iter().all(|p| p.trim().is_empty())
    }
}

/// A conditional 404 rule: when a request path that produced a 404 matches
/// `path_condition`, render `target_page_id` instead of the generic page.
///
/// When several enabled rules match, the one with the highest `weight` wins.
///
/// With the `serde` feature, records deserialize from exported configuration:
/// `pathCondition` is accepted for `path_condition`, its `pages` may be
/// newline-separated text, and a missing or empty `label` becomes the id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "record::RuleRecord")
)]
pub struct Rule {
    pub id: String,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "page"))]
    pub target_page_id: String,
    pub path_condition: PathCondition,
    #[cfg_attr(feature = "serde", serde(rename = "status"))]
    pub enabled: bool,
    pub weight: i32,
}

impl Rule {
    /// An enabled rule with weight 0 whose label is its id.
    pub fn new(id: impl Into<String>, target_page_id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            target_page_id: target_page_id.into(),
            path_condition: PathCondition::default(),
            enabled: true,
            weight: 0,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: PathCondition) -> Self {
        self.path_condition = condition;
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.path_condition.patterns.push(pattern.into());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A rule whose path condition has been compiled into a matcher.
///
/// Produced by the compilation step and stored inside a
/// [`RuleSet`](super::RuleSet). `index` is the rule's declaration position,
/// used to break weight ties.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) rule: Rule,
    pub(crate) matcher: Option<PathMatcher>,
    pub(crate) index: usize,
}

impl CompiledRule {
    pub(crate) fn matches(&self, normalized_path: &str) -> bool {
        self.rule.enabled
            && self
                .matcher
                .as_ref()
                .is_some_and(|m| m.matches_normalized(normalized_path))
    }
}

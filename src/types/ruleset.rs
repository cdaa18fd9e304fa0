use std::fmt;

use tracing::debug;

use super::alias::AliasResolver;
use super::error::CompileError;
use super::pattern::DEFAULT_FRONT_PAGE;
use super::resolution::Resolution;
use super::resolution_report::ResolutionReport;
use super::rule::{CompiledRule, PathCondition, Rule};

/// Builder for constructing a [`RuleSet`].
///
/// Rules are defined via closures and compiled into an immutable, thread-safe
/// resolution structure.
///
/// # Example
///
/// ```
/// use notfound::{AliasMap, RuleSetBuilder};
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("spanish", |r| r.label("Spanish pages").page("20").path("/es/*").weight(5))
///     .rule("catch_all", |r| r.page("10").path("/*"))
///     .compile()
///     .unwrap();
///
/// let aliases = AliasMap::new().alias("20", "/es/no-encontrado");
/// assert_eq!(
///     ruleset.resolve("/es/productos/42", &aliases).as_deref(),
///     Some("/es/no-encontrado"),
/// );
/// ```
#[derive(Debug)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    front_page: String,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            front_page: DEFAULT_FRONT_PAGE.to_owned(),
        }
    }
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule. The closure sets its target page and path patterns.
    ///
    /// A rule without patterns compiles but never matches.
    #[must_use]
    pub fn rule(mut self, id: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder {
            rule: Rule::new(id, ""),
        });
        self.rules.push(builder.rule);
        self
    }

    /// Add an already built rule record.
    #[must_use]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Path that `<front>` stands for in patterns. Defaults to `/`.
    #[must_use]
    pub fn front_page(mut self, path: impl Into<String>) -> Self {
        self.front_page = path.into();
        self
    }

    /// Compile the rules into an immutable `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if a rule id is empty or duplicated.
    pub fn compile(self) -> Result<RuleSet, CompileError> {
        crate::compile::compile(&self.rules, &self.front_page)
    }
}

impl Extend<Rule> for RuleSetBuilder {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl RuleBuilder {
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.rule.label = label.into();
        self
    }

    /// Set the page rendered when this rule wins.
    #[must_use]
    pub fn page(mut self, page_id: impl Into<String>) -> Self {
        self.rule.target_page_id = page_id.into();
        self
    }

    /// Add one path pattern.
    #[must_use]
    pub fn path(mut self, pattern: impl Into<String>) -> Self {
        self.rule.path_condition.patterns.push(pattern.into());
        self
    }

    #[must_use]
    pub fn paths<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule
            .path_condition
            .patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Replace the whole path condition.
    #[must_use]
    pub fn condition(mut self, condition: PathCondition) -> Self {
        self.rule.path_condition = condition;
        self
    }

    /// Match every path the patterns do not match.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.rule.path_condition.negate = true;
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: i32) -> Self {
        self.rule.weight = weight;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.rule.enabled = enabled;
        self
    }

    #[must_use]
    pub fn disabled(self) -> Self {
        self.enabled(false)
    }
}

/// A compiled, immutable set of conditional 404 rules. Thread-safe and
/// designed to live behind `Arc`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Sorted by weight, highest first; ties in declaration order.
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) front_page: String,
}

impl RuleSet {
    /// Compile plain rule records.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if a rule id is empty or duplicated.
    pub fn from_rules(rules: &[Rule]) -> Result<Self, CompileError> {
        crate::compile::compile(rules, DEFAULT_FRONT_PAGE)
    }

    /// Parse a DSL string and compile into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](crate::NotFoundError) on parse or compile failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::NotFoundError> {
        let parsed = crate::parse::parse(input)?;
        let ruleset = crate::compile::compile(&parsed.rules, DEFAULT_FRONT_PAGE)?;
        Ok(ruleset)
    }

    /// Read a DSL file and compile into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](crate::NotFoundError) on I/O, parse, or compile failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::NotFoundError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }

    /// Enabled rules whose path condition matches `request_path`, in
    /// declaration order.
    #[must_use]
    pub fn applicable(&self, request_path: &str) -> Vec<&Rule> {
        crate::evaluate::applicable(&self.rules, request_path)
    }

    /// The highest-weight enabled rule matching `request_path`.
    #[must_use]
    pub fn winner(&self, request_path: &str) -> Option<&Rule> {
        crate::evaluate::winner(&self.rules, request_path)
    }

    /// Resolve `request_path` to the path of the winning rule's target page.
    ///
    /// Returns `None` if no enabled rule matches or the winner's page does not
    /// resolve. Lower-weight rules are not tried when the winner's lookup fails.
    #[must_use]
    pub fn resolve<A>(&self, request_path: &str, aliases: &A) -> Option<String>
    where
        A: AliasResolver + ?Sized,
    {
        let winner = self.winner(request_path)?;
        crate::evaluate::resolve_target(winner, aliases)
    }

    /// Resolve with diagnostics: every matching rule, the winner, and timing.
    pub fn resolve_detailed<A>(&self, request_path: &str, aliases: &A) -> ResolutionReport
    where
        A: AliasResolver + ?Sized,
    {
        crate::evaluate::resolve_detailed(&self.rules, request_path, aliases)
    }

    /// Decide what to render for a 404 on `request_path`.
    ///
    /// A conditional rule takes precedence. When none yields a path, the
    /// site-wide default 404 path is used if it is set and non-blank.
    pub fn handle_not_found<A>(
        &self,
        request_path: &str,
        aliases: &A,
        site_default: Option<&str>,
    ) -> Resolution
    where
        A: AliasResolver + ?Sized,
    {
        if let Some(rule) = self.winner(request_path) {
            if let Some(path) = crate::evaluate::resolve_target(rule, aliases) {
                return Resolution::conditional(&rule.id, path);
            }
        }

        match site_default.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => {
                debug!(request_path, path, "falling back to site default 404 page");
                Resolution::SiteDefault(path.to_owned())
            }
            None => {
                debug!(request_path, "no 404 page configured");
                Resolution::Unhandled
            }
        }
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().map(|r| &r.rule).find(|r| r.id == id)
    }

    /// Rule ids with their weights, in the order they are tried.
    #[must_use]
    pub fn rule_order(&self) -> Vec<(&str, i32)> {
        self.rules
            .iter()
            .map(|r| (r.rule.id.as_str(), r.rule.weight))
            .collect()
    }

    /// All rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> Vec<&Rule> {
        let mut rules: Vec<&CompiledRule> = self.rules.iter().collect();
        rules.sort_by_key(|r| r.index);
        rules.into_iter().map(|r| &r.rule).collect()
    }

    #[must_use]
    pub fn front_page(&self) -> &str {
        &self.front_page
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled = self.rules.iter().filter(|r| r.rule.enabled).count();
        write!(f, "RuleSet({} rules, {} enabled)", self.rules.len(), enabled)
    }
}

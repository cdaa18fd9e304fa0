mod alias;
mod error;
mod pattern;
#[cfg(feature = "serde")]
mod record;
mod resolution;
mod resolution_report;
mod rule;
mod ruleset;

pub use alias::{AliasMap, AliasResolver};
pub use error::CompileError;
pub use pattern::{normalize_path, PathMatcher, FRONT_TOKEN};
pub(crate) use pattern::DEFAULT_FRONT_PAGE;
pub use resolution::Resolution;
pub use resolution_report::ResolutionReport;
pub(crate) use rule::CompiledRule;
pub use rule::{PathCondition, Rule};
pub use ruleset::{RuleBuilder, RuleSet, RuleSetBuilder};

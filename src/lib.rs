//! Conditional "page not found" resolution.
//!
//! A site answers unknown paths with a generic 404 document. Conditional 404
//! rules replace it per path: every enabled rule whose path patterns match the
//! request competes, the highest weight wins, and its target page is resolved
//! to a public path through an [`AliasResolver`].
//!
//! ```
//! use notfound::{AliasMap, Resolution, RuleSet};
//!
//! let ruleset = RuleSet::from_dsl(r#"
//! rule spanish "Spanish pages" (weight 5) -> 20:
//!     /es/*
//! rule shop -> 12:
//!     /shop /shop/*
//! "#).unwrap();
//!
//! let aliases = AliasMap::new().alias("20", "/es/no-encontrado");
//! assert_eq!(
//!     ruleset.handle_not_found("/es/x", &aliases, Some("/404")),
//!     Resolution::conditional("spanish", "/es/no-encontrado"),
//! );
//! assert_eq!(
//!     ruleset.handle_not_found("/blog/x", &aliases, Some("/404")),
//!     Resolution::SiteDefault("/404".into()),
//! );
//! ```

mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use error::NotFoundError;
pub use evaluate::{find_applicable_rules, resolve, select_winning_path};
pub(crate) use types::CompiledRule;
pub use types::{
    normalize_path, AliasMap, AliasResolver, CompileError, PathCondition, PathMatcher,
    Resolution, ResolutionReport, Rule, RuleBuilder, RuleSet, RuleSetBuilder, FRONT_TOKEN,
};

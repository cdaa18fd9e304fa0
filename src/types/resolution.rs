use std::fmt;

/// What to render for a request that produced a 404.
///
/// Returned by [`RuleSet::handle_not_found()`](super::RuleSet::handle_not_found).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Resolution {
    /// A conditional rule matched and its target page resolved to `path`.
    Conditional { rule_id: String, path: String },
    /// No rule produced a path; render the site-wide 404 page at this path.
    SiteDefault(String),
    /// Nothing configured applies. The caller renders its built-in 404.
    Unhandled,
}

impl Resolution {
    pub fn conditional(rule_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Conditional {
            rule_id: rule_id.into(),
            path: path.into(),
        }
    }

    /// The path to sub-request, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Conditional { path, .. } | Self::SiteDefault(path) => Some(path),
            Self::Unhandled => None,
        }
    }

    /// Id of the rule that produced this resolution.
    #[must_use]
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Self::Conditional { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Conditional { .. })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conditional { rule_id, path } => write!(f, "{rule_id} -> {path}"),
            Self::SiteDefault(path) => write!(f, "site default -> {path}"),
            Self::Unhandled => write!(f, "unhandled"),
        }
    }
}

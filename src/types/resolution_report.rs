use std::fmt;
use std::time::Duration;

/// Detailed resolution report returned by
/// [`RuleSet::resolve_detailed()`](super::RuleSet::resolve_detailed).
///
/// Records every rule that matched (highest weight first), the winner, the
/// path its target resolved to, and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct ResolutionReport {
    matched: Vec<String>,
    winner: Option<String>,
    path: Option<String>,
    duration: Duration,
}

impl ResolutionReport {
    pub(crate) fn new(
        matched: Vec<String>,
        winner: Option<String>,
        path: Option<String>,
        duration: Duration,
    ) -> Self {
        Self {
            matched,
            winner,
            path,
            duration,
        }
    }

    /// Ids of the matching enabled rules, in selection order.
    #[must_use]
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    /// Id of the highest-weight matching rule.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// The resolved path, same as [`RuleSet::resolve()`](super::RuleSet::resolve).
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.winner, &self.path) {
            (Some(w), Some(p)) => write!(f, "winner: {w} -> {p}")?,
            (Some(w), None) => write!(f, "winner: {w} (unresolved)")?,
            _ => write!(f, "winner: none")?,
        }
        write!(f, ", matched: [{}]", self.matched.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

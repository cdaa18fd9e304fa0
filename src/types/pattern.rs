use regex::Regex;

use super::rule::PathCondition;

/// Token standing for the site's front page inside a pattern.
pub const FRONT_TOKEN: &str = "<front>";

pub(crate) const DEFAULT_FRONT_PAGE: &str = "/";

/// A path condition compiled into a single anchored regular expression.
///
/// All patterns of a condition are joined into one alternation, so matching a
/// path is one regex search no matter how many patterns the rule lists.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    negate: bool,
}

impl PathMatcher {
    /// Compile a condition, substituting `front_page` for `<front>`.
    ///
    /// Returns `Ok(None)` when the condition has no usable pattern; such a
    /// condition never matches.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the combined expression exceeds the regex
    /// size limits. Every literal is escaped, so no pattern text is invalid.
    pub fn compile(
        condition: &PathCondition,
        front_page: &str,
    ) -> Result<Option<Self>, regex::Error> {
        let alternatives: Vec<String> = condition
            .patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| pattern_to_regex(p, front_page))
            .collect();

        if alternatives.is_empty() {
            return Ok(None);
        }

        let regex = Regex::new(&format!("^(?s:{})$", alternatives.join("|")))?;
        Ok(Some(Self {
            regex,
            negate: condition.negate,
        }))
    }

    /// Match a raw request path. The path is normalized first.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matches_normalized(normalize_path(path))
    }

    pub(crate) fn matches_normalized(&self, path: &str) -> bool {
        self.regex.is_match(path) != self.negate
    }
}

/// Strip trailing slashes from a request path; `/` itself (and the empty
/// path) normalize to `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn pattern_to_regex(pattern: &str, front_page: &str) -> String {
    let pattern = pattern.replace(FRONT_TOKEN, front_page);
    pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> PathMatcher {
        PathMatcher::compile(&PathCondition::new(patterns.iter().copied()), "/")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn exact_pattern() {
        let m = matcher(&["/foo"]);
        assert!(m.matches("/foo"));
        assert!(!m.matches("/foo/bar"));
        assert!(!m.matches("/foobar"));
        assert!(!m.matches("/bar/foo"));
    }

    #[test]
    fn trailing_wildcard_crosses_segments() {
        let m = matcher(&["/es/*"]);
        assert!(m.matches("/es/products"));
        assert!(m.matches("/es/products/42/reviews"));
        assert!(!m.matches("/es"));
        assert!(!m.matches("/fr/products"));
    }

    #[test]
    fn inner_wildcard() {
        let m = matcher(&["/blog/*/comments"]);
        assert!(m.matches("/blog/2024/01/comments"));
        assert!(!m.matches("/blog/2024/01/likes"));
    }

    #[test]
    fn any_of_several_patterns() {
        let m = matcher(&["/a", "/b/*"]);
        assert!(m.matches("/a"));
        assert!(m.matches("/b/c"));
        assert!(!m.matches("/c"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = matcher(&["/search.php?q=(x)"]);
        assert!(m.matches("/search.php?q=(x)"));
        assert!(!m.matches("/searchXphp?q=(x)"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = matcher(&["/Foo"]);
        assert!(m.matches("/Foo"));
        assert!(!m.matches("/foo"));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let m = matcher(&["/foo"]);
        assert!(m.matches("/foo/"));
        assert!(m.matches("/foo//"));
    }

    #[test]
    fn front_token_uses_front_page() {
        let cond = PathCondition::new(["<front>"]);
        let root = PathMatcher::compile(&cond, "/").unwrap().unwrap();
        assert!(root.matches("/"));
        assert!(!root.matches("/home"));

        let home = PathMatcher::compile(&cond, "/home").unwrap().unwrap();
        assert!(home.matches("/home"));
        assert!(!home.matches("/"));
    }

    #[test]
    fn negate_inverts() {
        let cond = PathCondition::new(["/admin/*"]).negated();
        let m = PathMatcher::compile(&cond, "/").unwrap().unwrap();
        assert!(!m.matches("/admin/config"));
        assert!(m.matches("/shop/cart"));
    }

    #[test]
    fn empty_condition_compiles_to_none() {
        let cond = PathCondition::new(["", "   "]);
        assert!(PathMatcher::compile(&cond, "/").unwrap().is_none());
        assert!(PathMatcher::compile(&PathCondition::default(), "/")
            .unwrap()
            .is_none());
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("/a/b/"), "/a/b");
        assert_eq!(normalize_path("/a/b"), "/a/b");
        assert_eq!(normalize_path("/foo//"), "/foo");
    }
}

//! Paths that user-defined routes may never claim.

/// Static set of reserved path prefixes.
#[derive(Debug, Clone)]
pub struct ReservedPaths {
    prefixes: Vec<String>,
}

impl ReservedPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The set protecting a single admin mount point.
    pub fn admin(prefix: impl Into<String>) -> Self {
        Self::new([prefix])
    }

    /// True if `candidate` is a reserved prefix or lies beneath one.
    ///
    /// `"/p"` reserves `"/p"`, `"/p/"` and `"/p/anything"`, but not `"/pp"`.
    pub fn is_reserved(&self, candidate: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            candidate
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_prefix_is_reserved() {
        let reserved = ReservedPaths::admin("/RouTe/panel");
        assert!(reserved.is_reserved("/RouTe/panel"));
    }

    #[test]
    fn sub_paths_are_reserved() {
        let reserved = ReservedPaths::admin("/RouTe/panel");
        assert!(reserved.is_reserved("/RouTe/panel/"));
        assert!(reserved.is_reserved("/RouTe/panel/routes"));
        assert!(reserved.is_reserved("/RouTe/panel/a/b"));
    }

    #[test]
    fn lookalikes_are_not_reserved() {
        let reserved = ReservedPaths::admin("/RouTe/panel");
        assert!(!reserved.is_reserved("/RouTe/panelx"));
        assert!(!reserved.is_reserved("/RouTe"));
        assert!(!reserved.is_reserved("/route/panel"));
        assert!(!reserved.is_reserved("/x/RouTe/panel"));
    }

    #[test]
    fn any_prefix_in_the_set_matches() {
        let reserved = ReservedPaths::new(["/admin", "/internal"]);
        assert!(reserved.is_reserved("/internal/health"));
        assert!(!reserved.is_reserved("/public"));
        assert_eq!(reserved.prefixes().count(), 2);
    }
}

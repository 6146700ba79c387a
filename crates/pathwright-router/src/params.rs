//! Bindings collected while walking the tree.
//!
//! [`Params`] keeps name/value pairs in path order, inline for the usual
//! handful of bindings. [`Captures`] groups everything a successful lookup
//! extracts and can be rolled back exactly when the resolver abandons an
//! alternative.

use smallvec::SmallVec;

/// Bindings held inline before spilling to the heap.
const INLINE_BINDINGS: usize = 4;

/// Ordered name/value bindings.
///
/// # Example
///
/// ```rust
/// use pathwright_router::Params;
///
/// let mut params = Params::new();
/// params.push("org", "acme");
/// params.push("repo", "anvil");
///
/// assert_eq!(params.get("repo"), Some("anvil"));
/// assert_eq!(params.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["org", "repo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    bindings: SmallVec<[(String, String); INLINE_BINDINGS]>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Value bound to `name`; the latest binding wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.bindings.truncate(len);
    }
}

/// Binding counts recorded before an alternative is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    variables: usize,
    named: usize,
    groups: usize,
    remainder: bool,
}

/// Everything a successful lookup extracted from the path.
///
/// # Example
///
/// ```rust
/// use pathwright_router::{Method, RouteTree};
///
/// let mut tree = RouteTree::new();
/// tree.insert(&[Method::Get], &["/posts/$id:d/@[a-z]+@slug"], vec!["showPost"], vec![])
///     .unwrap();
///
/// let resolved = tree.resolve(Method::Get, "/posts/7/hello").unwrap();
/// assert_eq!(resolved.captures.variables.get("id"), Some("7"));
/// assert_eq!(resolved.captures.named.get("slug"), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    /// `$name` bindings.
    pub variables: Params,
    /// `@pattern@name` bindings (whole match).
    pub named: Params,
    /// Whole match followed by every group, for each unnamed regex segment.
    pub groups: Vec<String>,
    /// Path text matched by a `...` segment.
    pub remainder: Option<String>,
}

impl Captures {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            variables: self.variables.len(),
            named: self.named.len(),
            groups: self.groups.len(),
            remainder: self.remainder.is_some(),
        }
    }

    /// Removes exactly the bindings added since `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.variables.truncate(checkpoint.variables);
        self.named.truncate(checkpoint.named);
        self.groups.truncate(checkpoint.groups);
        if !checkpoint.remainder {
            self.remainder = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_path_order() {
        let mut params = Params::new();
        params.push("year", "2024");
        params.push("month", "05");

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            [("year", "2024"), ("month", "05")]
        );
        assert_eq!(params.get("day"), None);
    }

    #[test]
    fn test_params_latest_binding_wins() {
        let mut params = Params::new();
        params.push("id", "1");
        params.push("id", "2");
        assert_eq!(params.get("id"), Some("2"));

        params.truncate(1);
        assert_eq!(params.get("id"), Some("1"));
    }

    #[test]
    fn test_params_spill_past_inline_capacity() {
        let mut params = Params::new();
        for i in 0..10 {
            params.push(format!("seg{i}"), i.to_string());
        }

        assert_eq!(params.len(), 10);
        assert_eq!(params.get("seg7"), Some("7"));
    }

    #[test]
    fn test_captures_rollback_is_exact() {
        let mut captures = Captures::new();
        captures.variables.push("org", "acme");
        let checkpoint = captures.checkpoint();

        captures.variables.push("id", "7");
        captures.named.push("slug", "hello");
        captures.groups.push("2024".to_string());
        captures.rollback(checkpoint);

        assert_eq!(captures.variables.len(), 1);
        assert_eq!(captures.variables.get("org"), Some("acme"));
        assert!(captures.named.is_empty());
        assert!(captures.groups.is_empty());
    }

    #[test]
    fn test_rollback_clears_remainder_set_after_checkpoint() {
        let mut captures = Captures::new();
        let checkpoint = captures.checkpoint();
        captures.remainder = Some("a/b".to_string());
        captures.rollback(checkpoint);
        assert_eq!(captures.remainder, None);
    }
}

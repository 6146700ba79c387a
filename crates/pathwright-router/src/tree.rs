//! Per-method route trees.
//!
//! This module provides [`RouteTree`], the entry point for registering
//! patterns and resolving request paths.

use crate::error::{BuildError, BuildResult, FailureReason, ResolveFailure};
use crate::method::Method;
use crate::node::Node;
use crate::params::Captures;
use crate::segment::{split_path, split_pattern, Segment};
use crate::Resolved;

/// Route trees for every routable method.
///
/// `T` is the callback payload: an operation name in tests and benchmarks,
/// a callable handle in the dispatcher.
///
/// # Example
///
/// ```rust
/// use pathwright_router::{Method, RouteTree};
///
/// let mut tree = RouteTree::new();
/// tree.insert(&[Method::Get], &["/users"], vec!["listUsers"], vec![]).unwrap();
/// tree.insert(&[Method::Get], &["/users/$id:d"], vec!["getUser"], vec![]).unwrap();
///
/// let resolved = tree.resolve(Method::Get, "/users/42").unwrap();
/// assert_eq!(resolved.handlers.callbacks(), ["getUser"]);
/// assert_eq!(resolved.captures.variables.get("id"), Some("42"));
/// ```
///
/// # Route Priority
///
/// For each segment the candidates are tried in a fixed order:
///
/// 1. **Literal** (`/users/me`); taken without backtracking
/// 2. **Regex** (`/users/@[a-z]+@name`), in registration order
/// 3. **Variable** (`/users/$id:d`), in registration order
/// 4. **Wildcard** (`/users/...`); consumes the rest of the path
///
/// A regex or variable alternative whose subtree fails is undone and the
/// next one is tried.
#[derive(Debug, Clone)]
pub struct RouteTree<T> {
    /// One root per method; `None` until a route is registered for it.
    roots: [Option<Node<T>>; 5],
    /// Number of (method, pattern) registrations.
    route_count: usize,
}

impl<T> Default for RouteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: [None, None, None, None, None],
            route_count: 0,
        }
    }

    /// Registers `callbacks` and `hooks` for every (method, pattern) pair.
    ///
    /// Every pattern is parsed before the tree is touched, so an error
    /// leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a pattern has a non-terminal wildcard, an
    /// invalid regex segment, or an unnamed variable.
    pub fn insert<P: AsRef<str>>(
        &mut self,
        methods: &[Method],
        patterns: &[P],
        callbacks: Vec<T>,
        hooks: Vec<String>,
    ) -> BuildResult<()>
    where
        T: Clone,
    {
        let parsed = patterns
            .iter()
            .map(|p| parse_pattern(p.as_ref()))
            .collect::<BuildResult<Vec<_>>>()?;

        for method in methods {
            let root = self.roots[method.index()].get_or_insert_with(Node::root);
            for segments in &parsed {
                root.insert(segments, callbacks.clone(), hooks.clone());
                self.route_count += 1;
            }
        }

        Ok(())
    }

    /// Resolves a path for a method.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveFailure`] (code 404) when the method has no routes
    /// or no registered pattern accepts the path.
    pub fn resolve<'t>(
        &'t self,
        method: Method,
        path: &str,
    ) -> Result<Resolved<'t, T>, ResolveFailure> {
        let root = self
            .root(method)
            .ok_or(ResolveFailure::not_found(FailureReason::MethodNotRegistered))?;

        let segments = split_path(path);
        let mut captures = Captures::new();
        let handlers = root
            .search(path, &segments, &mut captures)
            .map_err(ResolveFailure::not_found)?;

        Ok(Resolved { handlers, captures })
    }

    /// Returns the root node for a method, if it has routes.
    #[must_use]
    pub fn root(&self, method: Method) -> Option<&Node<T>> {
        self.roots[method.index()].as_ref()
    }

    /// Methods that have at least one route.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL
            .into_iter()
            .filter(|m| self.roots[m.index()].is_some())
    }

    /// Returns the number of (method, pattern) registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

/// Splits and classifies a pattern, checking wildcard placement.
fn parse_pattern(pattern: &str) -> BuildResult<Vec<Segment>> {
    let texts = split_pattern(pattern);
    let last = texts.len().saturating_sub(1);

    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let segment = Segment::parse(text, pattern)?;
            if matches!(segment, Segment::Wildcard) && i != last {
                return Err(BuildError::WildcardNotTerminal {
                    pattern: pattern.to_string(),
                });
            }
            Ok(segment)
        })
        .collect()
}

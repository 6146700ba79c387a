//! Sigil-based route tree for Pathwright.
//!
//! This crate builds a per-method tree from URL patterns and resolves
//! request paths against it. Patterns are made of segments separated by `/`
//! (or `.`), and each segment is one of:
//!
//! - **Literal**: `users`
//! - **Variable**: `$id`, optionally typed as `$id:d` (digits), `:a`
//!   (letters), `:A` (letters and digits), `:l` (lowercase) or `:u`
//!   (uppercase)
//! - **Regex**: `@[0-9]+`, optionally captured as `@[0-9]+@page`; always
//!   matched against the whole segment
//! - **Wildcard**: `...`, which must end the pattern and captures the rest of
//!   the path
//!
//! # Example
//!
//! ```rust
//! use pathwright_router::{Method, RouteTree};
//!
//! let mut tree = RouteTree::new();
//!
//! tree.insert(&[Method::Get], &["/users"], vec!["listUsers"], vec![]).unwrap();
//! tree.insert(&[Method::Get], &["/users/$id:d"], vec!["getUser"], vec![]).unwrap();
//! tree.insert(&[Method::Get], &["/files/..."], vec!["serveFile"], vec![]).unwrap();
//!
//! let resolved = tree.resolve(Method::Get, "/users/123").unwrap();
//! assert_eq!(resolved.handlers.callbacks(), ["getUser"]);
//! assert_eq!(resolved.captures.variables.get("id"), Some("123"));
//!
//! let resolved = tree.resolve(Method::Get, "/files/img/logo.png").unwrap();
//! assert_eq!(resolved.captures.remainder.as_deref(), Some("img/logo.png"));
//!
//! let failure = tree.resolve(Method::Delete, "/users").unwrap_err();
//! assert_eq!(failure.code, 404);
//! ```
//!
//! # Architecture
//!
//! ```text
//!                 GET root
//!                    │
//!                 "users" [listUsers]
//!          ┌─────────┼──────────┐
//!       literal    regex     variable
//!        "me"    "[a-z]+@n"   "id:d"
//!                               │
//!                           [getUser]
//! ```

mod error;
mod method;
mod node;
mod params;
mod segment;
mod tree;

pub use error::{BuildError, BuildResult, FailureReason, ResolveFailure};
pub use method::Method;
pub use node::{Handlers, Node};
pub use params::{Captures, Params};
pub use segment::{split_path, PathSegment, Segment, TypeConstraint, WILDCARD};
pub use tree::RouteTree;

/// A successful lookup: the handler chain and what the path bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a, T> {
    /// The chain registered for the matched route.
    pub handlers: &'a Handlers<T>,
    /// Bindings extracted along the way.
    pub captures: Captures,
}

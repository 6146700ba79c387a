//! Build and resolution errors.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`BuildError`].
pub type BuildResult<T> = Result<T, BuildError>;

/// A route registration that cannot be added to the tree.
///
/// Build errors abort the whole registration: the tree is left exactly as it
/// was before the call.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A `...` segment appeared before the end of a pattern.
    #[error("wildcard must be the final segment of pattern `{pattern}`")]
    WildcardNotTerminal {
        /// The offending pattern.
        pattern: String,
    },

    /// A `@` segment did not compile.
    #[error("invalid regex segment `{segment}` in pattern `{pattern}`")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// The regex segment text, without the sigil.
        segment: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },

    /// A `$` segment without a name.
    #[error("variable segment without a name in pattern `{pattern}`")]
    EmptyVariable {
        /// The offending pattern.
        pattern: String,
    },

    /// The method is not one of the routable methods.
    #[error("unsupported request method: {0}")]
    UnsupportedMethod(String),
}

/// Why a lookup found no handler chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// No route was ever registered for the request method.
    MethodNotRegistered,
    /// The path ended on a node that does not terminate a route.
    NoHandler,
    /// No child of some node accepted the next segment.
    NoMatch,
}

impl FailureReason {
    /// Message recorded in the request context.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MethodNotRegistered => "method not registered",
            Self::NoHandler => "no handler at path",
            Self::NoMatch => "no matching route",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A failed lookup, carried as data rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveFailure {
    /// Error code to dispatch (always 404 for lookups).
    pub code: u16,
    /// What went wrong.
    pub reason: FailureReason,
}

impl ResolveFailure {
    /// Error code used for every lookup failure.
    pub const NOT_FOUND: u16 = 404;

    /// Creates a not-found failure.
    #[must_use]
    pub const fn not_found(reason: FailureReason) -> Self {
        Self {
            code: Self::NOT_FOUND,
            reason,
        }
    }

    /// Message recorded in the request context.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.reason.message()
    }
}

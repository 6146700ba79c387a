//! Per-request resolution context.
//!
//! A [`ResolutionContext`] is created for every dispatched request and passed
//! by reference to each hook, callback and error handler that runs for it.

use pathwright_router::{Captures, Params};

/// Everything known about one request while it is being dispatched.
///
/// # Example
///
/// ```
/// use pathwright::ResolutionContext;
///
/// let ctx = ResolutionContext::new("get", "/users/42?full=1");
/// assert_eq!(ctx.method(), "GET");
/// assert_eq!(ctx.url(), "/users/42?full=1");
/// assert_eq!(ctx.path(), "/users/42");
/// assert!(ctx.errno().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    url: String,
    method: String,
    captures: Captures,
    errno: Option<u16>,
    error: Option<String>,
}

impl ResolutionContext {
    /// Creates a context for a request. The method is stored upper-cased.
    #[must_use]
    pub fn new(method: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.as_ref().to_ascii_uppercase(),
            ..Self::default()
        }
    }

    /// The URL as passed to the dispatcher, query and fragment included.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL without its query string or fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        strip_query(&self.url)
    }

    /// The request method, upper-cased.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Value bound to a `$name` segment.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.captures.variables.get(name)
    }

    /// All `$name` bindings in path order.
    #[must_use]
    pub fn variables(&self) -> &Params {
        &self.captures.variables
    }

    /// Segment matched by a `@pattern@name` segment.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures.named.get(name)
    }

    /// All named regex captures in path order.
    #[must_use]
    pub fn captures(&self) -> &Params {
        &self.captures.named
    }

    /// Raw matches of unnamed regex segments: for each, the whole match
    /// followed by its groups.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.captures.groups
    }

    /// Path text matched by a `...` segment.
    #[must_use]
    pub fn remainder(&self) -> Option<&str> {
        self.captures.remainder.as_deref()
    }

    /// Code of the error being reported, if any.
    #[must_use]
    pub fn errno(&self) -> Option<u16> {
        self.errno
    }

    /// Message of the error being reported, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records an error code and message, replacing any earlier one.
    pub fn set_error(&mut self, code: u16, message: impl Into<String>) {
        self.errno = Some(code);
        self.error = Some(message.into());
    }

    /// Returns the context with an error recorded.
    #[must_use]
    pub fn with_error(mut self, code: u16, message: impl Into<String>) -> Self {
        self.set_error(code, message);
        self
    }

    pub(crate) fn bind(&mut self, captures: Captures) {
        self.captures = captures;
    }
}

/// Cuts a request target at the first `?` or `#`.
pub(crate) fn strip_query(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |end| &url[..end])
}

//! Handler abstractions.
//!
//! The dispatcher calls three kinds of handlers, all of which receive the
//! request's [`ResolutionContext`]:
//!
//! - [`Callback`]: terminal route handler; returns `anyhow::Result<()>`
//! - [`Hook`]: gate run before the callbacks; returns `false` to reject
//! - [`ErrorHandler`]: invoked for an error code; returns `true` to ask the
//!   host to halt
//!
//! Closures with the matching signature implement these traits directly, and
//! the builder takes closures as-is. Descriptor objects are adapted in
//! [`crate::descriptor`].

use crate::ResolutionContext;
use std::fmt;
use std::sync::Arc;

/// A terminal route handler.
///
/// # Example
///
/// ```
/// use pathwright::{Callback, ResolutionContext};
///
/// let show = |ctx: &ResolutionContext| -> anyhow::Result<()> {
///     let _id = ctx.variable("id");
///     Ok(())
/// };
///
/// let ctx = ResolutionContext::new("GET", "/users/1");
/// assert!(show.invoke(&ctx).is_ok());
/// ```
pub trait Callback: Send + Sync + 'static {
    /// Handles the request.
    ///
    /// # Errors
    ///
    /// Any error is logged and counted by the dispatcher; the remaining
    /// callbacks still run.
    fn invoke(&self, ctx: &ResolutionContext) -> anyhow::Result<()>;
}

impl<F> Callback for F
where
    F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn invoke(&self, ctx: &ResolutionContext) -> anyhow::Result<()> {
        self(ctx)
    }
}

/// A named gate run before a route's callbacks.
pub trait Hook: Send + Sync + 'static {
    /// Returns `false` to reject the request.
    fn check(&self, ctx: &ResolutionContext) -> bool;
}

impl<F> Hook for F
where
    F: Fn(&ResolutionContext) -> bool + Send + Sync + 'static,
{
    fn check(&self, ctx: &ResolutionContext) -> bool {
        self(ctx)
    }
}

/// Handler registered for one error code.
pub trait ErrorHandler: Send + Sync + 'static {
    /// Reports the error recorded on the context. Returns `true` to ask the
    /// host to halt.
    fn handle(&self, ctx: &ResolutionContext) -> bool;
}

impl<F> ErrorHandler for F
where
    F: Fn(&ResolutionContext) -> bool + Send + Sync + 'static,
{
    fn handle(&self, ctx: &ResolutionContext) -> bool {
        self(ctx)
    }
}

/// Shared, type-erased callback stored in the route tree.
#[derive(Clone)]
pub struct BoxedCallback(Arc<dyn Callback>);

impl BoxedCallback {
    /// Erases a closure.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Erases any [`Callback`] implementation.
    pub fn from_callback(callback: impl Callback) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Returns whatever the callback returns.
    pub fn invoke(&self, ctx: &ResolutionContext) -> anyhow::Result<()> {
        self.0.invoke(ctx)
    }
}

impl fmt::Debug for BoxedCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedCallback")
    }
}

/// Shared, type-erased hook.
pub(crate) type SharedHook = Arc<dyn Hook>;

/// Shared, type-erased error handler.
pub(crate) type SharedErrorHandler = Arc<dyn ErrorHandler>;

//! Setup-phase router construction.
//!
//! [`RouterBuilder`] collects routes, hooks and error handlers, then turns
//! into an immutable [`Router`]. Nothing can be registered once the router is
//! built, so a router shared between threads is never mutated.

use std::sync::Arc;

use pathwright_config::DispatchConfig;
use pathwright_router::{BuildResult, Method, RouteTree};
use tracing::{debug, warn};

use crate::handler::{BoxedCallback, SharedErrorHandler, SharedHook};
use crate::registry::{ErrorRegistry, HookRegistry};
use crate::{ResolutionContext, Router};

/// Builder for [`Router`].
///
/// Hooks must be registered before the routes that name them: a hook name
/// that is unknown when a route is registered is dropped from that route.
///
/// # Example
///
/// ```
/// use pathwright::{Method, RouterBuilder, ResolutionContext};
///
/// # fn main() -> Result<(), pathwright::BuildError> {
/// let mut builder = RouterBuilder::new();
/// builder
///     .hook("signed_in", |ctx: &ResolutionContext| ctx.variable("user").is_some())
///     .error_handler(404, |_: &ResolutionContext| false);
/// builder.get("/", |_: &ResolutionContext| Ok(()))?;
/// builder.route(
///     &[Method::Get, Method::Post],
///     &["/users/$user/settings"],
///     vec![pathwright::BoxedCallback::new(|_: &ResolutionContext| Ok(()))],
///     &["signed_in"],
/// )?;
///
/// let router = builder.build();
/// assert_eq!(router.route_count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RouterBuilder {
    tree: RouteTree<BoxedCallback>,
    hooks: HookRegistry,
    errors: ErrorRegistry,
    config: DispatchConfig,
}

impl RouterBuilder {
    /// Creates a builder with the default dispatch configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given dispatch configuration.
    #[must_use]
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the dispatch configuration.
    pub fn config(&mut self, config: DispatchConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Registers `callbacks` and `hooks` for every (method, pattern) pair.
    ///
    /// Registering a path again appends to its chain. Hook names without a
    /// registered hook are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if any pattern is malformed;
    /// nothing from the call is registered in that case.
    pub fn route<P: AsRef<str>>(
        &mut self,
        methods: &[Method],
        patterns: &[P],
        callbacks: Vec<BoxedCallback>,
        hooks: &[&str],
    ) -> BuildResult<&mut Self> {
        let hooks = self.known_hooks(hooks);
        let callback_count = callbacks.len();

        self.tree.insert(methods, patterns, callbacks, hooks)?;

        for pattern in patterns {
            debug!(
                methods = ?methods,
                pattern = pattern.as_ref(),
                callbacks = callback_count,
                "route registered"
            );
        }
        Ok(self)
    }

    /// Registers a `GET` route.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn get<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&[Method::Get], &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a `POST` route.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn post<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&[Method::Post], &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a `PUT` route.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn put<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&[Method::Put], &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a `PATCH` route.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn patch<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&[Method::Patch], &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a `DELETE` route.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn delete<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&[Method::Delete], &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a route for every method.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) if the pattern is malformed.
    pub fn all<F>(&mut self, pattern: &str, callback: F) -> BuildResult<&mut Self>
    where
        F: Fn(&ResolutionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(&Method::ALL, &[pattern], vec![BoxedCallback::new(callback)], &[])
    }

    /// Registers a hook under `name`, replacing any hook of the same name.
    pub fn hook<F>(&mut self, name: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(&ResolutionContext) -> bool + Send + Sync + 'static,
    {
        self.insert_hook(name.into(), Arc::new(hook))
    }

    /// Registers the handler for an error code, replacing any earlier one.
    pub fn error_handler<F>(&mut self, code: u16, handler: F) -> &mut Self
    where
        F: Fn(&ResolutionContext) -> bool + Send + Sync + 'static,
    {
        self.insert_error_handler(code, Arc::new(handler))
    }

    /// Number of (method, pattern) registrations so far.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.tree.len()
    }

    /// Builds the router. Registration is closed from here on.
    #[must_use]
    pub fn build(self) -> Router {
        debug!(
            routes = self.tree.len(),
            hooks = self.hooks.len(),
            error_handlers = self.errors.len(),
            "router built"
        );
        Router::new(self.tree, self.hooks, self.errors, self.config)
    }

    pub(crate) fn insert_hook(&mut self, name: String, hook: SharedHook) -> &mut Self {
        debug!(hook = %name, "hook registered");
        if self.hooks.insert(name, hook) {
            debug!("previous hook replaced");
        }
        self
    }

    pub(crate) fn insert_error_handler(
        &mut self,
        code: u16,
        handler: SharedErrorHandler,
    ) -> &mut Self {
        debug!(errno = code, "error handler registered");
        if self.errors.insert(code, handler) {
            debug!(errno = code, "previous error handler replaced");
        }
        self
    }

    fn known_hooks(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| {
                let known = self.hooks.contains(name);
                if !known {
                    warn!(hook = %name, "hook is not registered; dropped from route");
                }
                known
            })
            .map(ToString::to_string)
            .collect()
    }
}

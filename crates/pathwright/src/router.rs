//! The serving-phase router.

use std::fmt;

use pathwright_config::DispatchConfig;
use pathwright_router::{Method, ResolveFailure, Resolved, RouteTree};

use crate::handler::BoxedCallback;
use crate::registry::{ErrorRegistry, HookRegistry};
use crate::RouterBuilder;

/// An immutable route table plus the hooks and error handlers it refers to.
///
/// Built once by [`RouterBuilder`]; dispatching takes `&self`, so one router
/// can serve any number of threads.
pub struct Router {
    pub(crate) tree: RouteTree<BoxedCallback>,
    pub(crate) hooks: HookRegistry,
    pub(crate) errors: ErrorRegistry,
    pub(crate) config: DispatchConfig,
}

impl Router {
    pub(crate) fn new(
        tree: RouteTree<BoxedCallback>,
        hooks: HookRegistry,
        errors: ErrorRegistry,
        config: DispatchConfig,
    ) -> Self {
        Self {
            tree,
            hooks,
            errors,
            config,
        }
    }

    /// Starts building a router.
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The dispatch configuration in effect.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Number of (method, pattern) registrations.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.tree.len()
    }

    /// Resolves a path without running any handler.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveFailure`] when no route accepts the path.
    pub fn resolve(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Resolved<'_, BoxedCallback>, ResolveFailure> {
        self.tree.resolve(method, path)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.tree.len())
            .field("methods", &self.tree.methods().collect::<Vec<_>>())
            .field("hooks", &self.hooks)
            .field("errors", &self.errors)
            .field("config", &self.config)
            .finish()
    }
}

//! Descriptor-based registration.
//!
//! A descriptor is an object that carries both its registration data and its
//! entry point. Collect descriptors in a [`RouteTable`] and hand it to
//! [`RouterBuilder::import_table`]; each entry point ends up as an ordinary
//! callback, hook or error handler.
//!
//! # Example
//!
//! ```
//! use pathwright::descriptor::{HookDescriptor, RouteDescriptor, RouteTable};
//! use pathwright::{Method, ResolutionContext, RouterBuilder};
//!
//! struct ShowUser;
//!
//! impl RouteDescriptor for ShowUser {
//!     fn urls(&self) -> &[&str] {
//!         &["/users/$id:d"]
//!     }
//!     fn methods(&self) -> &[Method] {
//!         &[Method::Get]
//!     }
//!     fn hooks(&self) -> &[&str] {
//!         &["signed_in"]
//!     }
//!     fn entry_point(&self, _ctx: &ResolutionContext) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct SignedIn;
//!
//! impl HookDescriptor for SignedIn {
//!     fn hook_name(&self) -> &str {
//!         "signed_in"
//!     }
//!     fn entry_point(&self, _ctx: &ResolutionContext) -> bool {
//!         true
//!     }
//! }
//!
//! let table = RouteTable::new().route(ShowUser).hook(SignedIn);
//!
//! let mut builder = RouterBuilder::new();
//! builder.import_table(table).unwrap();
//! let router = builder.build();
//!
//! let resolved = router.resolve(Method::Get, "/users/7").unwrap();
//! assert_eq!(resolved.handlers.hooks(), ["signed_in"]);
//! ```

use std::fmt;
use std::sync::Arc;

use pathwright_router::{BuildResult, Method};
use tracing::debug;

use crate::handler::BoxedCallback;
use crate::{ResolutionContext, RouterBuilder};

/// A route: where it is mounted and what runs there.
pub trait RouteDescriptor: Send + Sync + 'static {
    /// Patterns the route is registered under.
    fn urls(&self) -> &[&str];

    /// Methods the route answers.
    fn methods(&self) -> &[Method];

    /// Hooks guarding the route, run in this order.
    fn hooks(&self) -> &[&str] {
        &[]
    }

    /// Handles a matched request.
    ///
    /// # Errors
    ///
    /// Errors are logged and counted by the dispatcher.
    fn entry_point(&self, ctx: &ResolutionContext) -> anyhow::Result<()>;
}

/// A named hook.
pub trait HookDescriptor: Send + Sync + 'static {
    /// Name routes refer to the hook by.
    fn hook_name(&self) -> &str;

    /// Returns `false` to reject the request.
    fn entry_point(&self, ctx: &ResolutionContext) -> bool;
}

/// An error handler for one code.
pub trait ErrorDescriptor: Send + Sync + 'static {
    /// Code the handler is registered for.
    fn errno(&self) -> u16;

    /// Short description of the error.
    fn error(&self) -> &str {
        ""
    }

    /// Reports the error. Returns `true` to ask the host to halt.
    fn entry_point(&self, ctx: &ResolutionContext) -> bool;
}

/// A set of descriptors to import in one go.
#[derive(Default)]
pub struct RouteTable {
    errors: Vec<Arc<dyn ErrorDescriptor>>,
    hooks: Vec<Arc<dyn HookDescriptor>>,
    routes: Vec<Arc<dyn RouteDescriptor>>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route descriptor.
    #[must_use]
    pub fn route(mut self, route: impl RouteDescriptor) -> Self {
        self.routes.push(Arc::new(route));
        self
    }

    /// Adds a hook descriptor.
    #[must_use]
    pub fn hook(mut self, hook: impl HookDescriptor) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Adds an error descriptor.
    #[must_use]
    pub fn error(mut self, error: impl ErrorDescriptor) -> Self {
        self.errors.push(Arc::new(error));
        self
    }

    /// Total number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.hooks.len() + self.routes.len()
    }

    /// Returns true if the table holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("errors", &self.errors.len())
            .field("hooks", &self.hooks.len())
            .field("routes", &self.routes.len())
            .finish()
    }
}

impl RouterBuilder {
    /// Registers every descriptor in `table`: error handlers first, then
    /// hooks, then routes, so routes can name hooks from the same table.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) for the first route whose
    /// patterns are malformed. Descriptors registered before it stay
    /// registered.
    pub fn import_table(&mut self, table: RouteTable) -> BuildResult<&mut Self> {
        let RouteTable {
            errors,
            hooks,
            routes,
        } = table;

        for descriptor in errors {
            let code = descriptor.errno();
            debug!(errno = code, error = descriptor.error(), "importing error descriptor");
            self.insert_error_handler(
                code,
                Arc::new(move |ctx: &ResolutionContext| descriptor.entry_point(ctx)),
            );
        }

        for descriptor in hooks {
            let name = descriptor.hook_name().to_string();
            self.insert_hook(
                name,
                Arc::new(move |ctx: &ResolutionContext| descriptor.entry_point(ctx)),
            );
        }

        for descriptor in routes {
            let entry = Arc::clone(&descriptor);
            let callback =
                BoxedCallback::new(move |ctx: &ResolutionContext| entry.entry_point(ctx));
            self.route(
                descriptor.methods(),
                descriptor.urls(),
                vec![callback],
                descriptor.hooks(),
            )?;
        }

        Ok(self)
    }
}

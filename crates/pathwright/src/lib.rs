//! # Pathwright
//!
//! A request dispatcher built on a sigil-based route tree.
//!
//! Routes are registered as URL patterns whose segments may be literals,
//! variables (`$id`, `$id:d`), regular expressions (`@[0-9]+@page`) or a
//! trailing wildcard (`...`). Each route carries a chain of callbacks and the
//! names of hooks that must pass before the callbacks run. Failures are routed
//! to error handlers registered per code.
//!
//! ## Quick Start
//!
//! ```rust
//! use pathwright::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Router::builder();
//! builder
//!     .hook("json_only", |ctx: &ResolutionContext| ctx.variable("format") == Some("json"))
//!     .error_handler(403, |_: &ResolutionContext| false)
//!     .error_handler(404, |_: &ResolutionContext| false);
//!
//! builder.route(
//!     &[Method::Get],
//!     &["/reports/$year:d.$format"],
//!     vec![BoxedCallback::new(|ctx: &ResolutionContext| {
//!         println!("report for {:?}", ctx.variable("year"));
//!         Ok(())
//!     })],
//!     &["json_only"],
//! )?;
//!
//! let router = builder.build();
//!
//! let ok = router.entry("GET", "/reports/2024.json")?;
//! assert!(ok.is_completed());
//!
//! let rejected = router.entry("GET", "/reports/2024.csv")?;
//! assert_eq!(rejected.status, DispatchStatus::Rejected { code: 403, halt: true });
//! # Ok(())
//! # }
//! ```
//!
//! ## Phases
//!
//! ```text
//! setup:    RouterBuilder ── route / hook / error_handler / import_table ──▶ build()
//! serving:  Router (immutable, Send + Sync) ── entry(method, url) ──▶ Dispatched
//! ```

#![doc(html_root_url = "https://docs.rs/pathwright/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod context;
pub mod descriptor;
mod dispatch;
mod error;
mod handler;
mod registry;
mod router;

pub use builder::RouterBuilder;
pub use context::ResolutionContext;
pub use dispatch::{DispatchStatus, Dispatched};
pub use error::{DispatchError, DispatchResult};
pub use handler::{BoxedCallback, Callback, ErrorHandler, Hook};
pub use router::Router;

pub use pathwright_config::{DispatchConfig, PathwrightConfig};
pub use pathwright_router::{
    BuildError, BuildResult, Captures, FailureReason, Method, Params, ResolveFailure, Resolved,
};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use pathwright::prelude::*;
///
/// let router = Router::builder().build();
/// assert_eq!(router.route_count(), 0);
/// ```
pub mod prelude {
    pub use crate::descriptor::{ErrorDescriptor, HookDescriptor, RouteDescriptor, RouteTable};
    pub use crate::{
        BoxedCallback, DispatchConfig, DispatchError, DispatchStatus, Dispatched, Method,
        ResolutionContext, Router, RouterBuilder,
    };
}

//! The per-request dispatch pipeline.
//!
//! ```text
//! entry ─▶ resolve ─┬─▶ matched ─▶ hooks ─┬─▶ passed ─▶ callbacks ─▶ Completed
//!                   │                     └─▶ rejected ─┐
//!                   └─▶ unmatched ──────────────────────┴─▶ emit error ─▶ Rejected
//! ```
//!
//! Resolution failures and hook rejections are recorded on the context and
//! reported through the error handler registered for their code. The only
//! error returned to the caller is a missing error handler.

use pathwright_router::{FailureReason, Method, ResolveFailure, Resolved};
use pathwright_telemetry::metrics::{self, DispatchOutcome};
use tracing::{debug, debug_span, error, info, warn};

use crate::context::strip_query;
use crate::handler::{ErrorHandler, Hook};
use crate::{DispatchError, DispatchResult, ResolutionContext, Router};

/// What happened to a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// The context as the last handler saw it.
    pub context: ResolutionContext,
    /// How the dispatch ended.
    pub status: DispatchStatus,
}

impl Dispatched {
    /// Returns true if the callbacks ran.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.status, DispatchStatus::Completed { .. })
    }

    /// Returns true if an error was emitted and the host should stop
    /// serving this request (or the process, if that is its policy).
    #[must_use]
    pub fn should_halt(&self) -> bool {
        matches!(self.status, DispatchStatus::Rejected { halt: true, .. })
    }
}

/// Final state of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Every hook passed and every callback was invoked.
    Completed {
        /// Callbacks invoked.
        invoked: usize,
        /// Callbacks that returned an error.
        failed: usize,
    },
    /// An error code was emitted instead of running the callbacks.
    Rejected {
        /// The emitted code.
        code: u16,
        /// Whether the host was asked to halt: the error handler's answer or
        /// the configured halt policy.
        halt: bool,
    },
}

impl Router {
    /// Dispatches one request.
    ///
    /// `url` may carry a query string or fragment; it is kept on the context
    /// but ignored for matching. The method is matched case-insensitively and
    /// an unknown method resolves like an unregistered one.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerNotFound`] if an error must be emitted
    /// and no handler is registered for its code.
    ///
    /// # Example
    ///
    /// ```
    /// use pathwright::{DispatchStatus, ResolutionContext, RouterBuilder};
    ///
    /// let mut builder = RouterBuilder::new();
    /// builder.get("/users/$id:d", |ctx: &ResolutionContext| {
    ///     assert_eq!(ctx.variable("id"), Some("42"));
    ///     Ok(())
    /// }).unwrap();
    /// builder.error_handler(404, |_: &ResolutionContext| false);
    /// let router = builder.build();
    ///
    /// let done = router.entry("get", "/users/42?expand=1").unwrap();
    /// assert_eq!(done.status, DispatchStatus::Completed { invoked: 1, failed: 0 });
    ///
    /// let missed = router.entry("GET", "/users/abc").unwrap();
    /// assert_eq!(missed.status, DispatchStatus::Rejected { code: 404, halt: true });
    /// ```
    pub fn entry(&self, method: &str, url: &str) -> DispatchResult<Dispatched> {
        let path = strip_query(url);
        let span = debug_span!("dispatch", http.method = %method, http.path = %path);
        let _guard = span.enter();

        let mut ctx = ResolutionContext::new(method, url);

        let resolution = ctx
            .method()
            .parse::<Method>()
            .map_err(|_| ResolveFailure::not_found(FailureReason::MethodNotRegistered))
            .and_then(|method| self.tree.resolve(method, path));

        let Resolved { handlers, captures } = match resolution {
            Ok(resolved) if !resolved.handlers.is_empty() => resolved,
            Ok(_) => {
                debug!("matched route has neither callbacks nor hooks");
                return self.reject_unmatched(ctx);
            }
            Err(failure) => {
                debug!(reason = %failure.reason, "resolution failed");
                ctx.set_error(failure.code, failure.message());
                return self.reject_unmatched(ctx);
            }
        };
        ctx.bind(captures);

        for name in handlers.hooks() {
            // Names were checked against the registry at registration.
            let Some(hook) = self.hooks.get(name) else {
                continue;
            };
            if !hook.check(&ctx) {
                return self.reject_hook(ctx, name);
            }
        }

        let mut failed = 0;
        for callback in handlers.callbacks() {
            if let Err(err) = callback.invoke(&ctx) {
                failed += 1;
                metrics::record_callback_failure();
                warn!(error = %format!("{err:#}"), "callback failed");
            }
        }
        let invoked = handlers.callbacks().len();

        metrics::record_dispatch(DispatchOutcome::Completed);
        info!(invoked, failed, "request dispatched");

        Ok(Dispatched {
            context: ctx,
            status: DispatchStatus::Completed { invoked, failed },
        })
    }

    /// Dispatches an `http` request, using its method and request target.
    ///
    /// # Errors
    ///
    /// Same as [`Router::entry`].
    pub fn entry_request<B>(&self, request: &http::Request<B>) -> DispatchResult<Dispatched> {
        let target = request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path(), http::uri::PathAndQuery::as_str);
        self.entry(request.method().as_str(), target)
    }

    /// Invokes the error handler registered for `code` with `ctx`.
    ///
    /// Returns the handler's answer: `true` asks the host to halt. The
    /// dispatcher records the code and message on the context before calling
    /// this; adapters raising their own errors should do the same with
    /// [`ResolutionContext::set_error`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerNotFound`] if no handler is registered
    /// for `code`.
    pub fn emit_error(&self, code: u16, ctx: &ResolutionContext) -> DispatchResult<bool> {
        let Some(handler) = self.errors.get(code) else {
            error!(errno = code, "no error handler registered");
            return Err(DispatchError::HandlerNotFound { code });
        };

        debug!(errno = code, error = ctx.error().unwrap_or_default(), "emitting error");
        Ok(handler.handle(ctx))
    }

    fn reject_unmatched(&self, mut ctx: ResolutionContext) -> DispatchResult<Dispatched> {
        let code = if let Some(code) = ctx.errno() {
            code
        } else {
            let code = self.config.fallback_error_code;
            ctx.set_error(code, self.config.fallback_error_message.clone());
            code
        };

        self.reject(
            ctx,
            code,
            self.config.halt_after_error,
            DispatchOutcome::Unmatched,
        )
    }

    fn reject_hook(&self, mut ctx: ResolutionContext, hook: &str) -> DispatchResult<Dispatched> {
        let code = self.config.hook_failure_code;
        ctx.set_error(code, self.config.hook_failure_message.clone());
        metrics::record_hook_rejection(hook);
        warn!(hook, errno = code, "hook rejected request");

        self.reject(
            ctx,
            code,
            self.config.halt_after_hook_failure,
            DispatchOutcome::HookRejected,
        )
    }

    fn reject(
        &self,
        ctx: ResolutionContext,
        code: u16,
        halt_policy: bool,
        outcome: DispatchOutcome,
    ) -> DispatchResult<Dispatched> {
        let handled = self.emit_error(code, &ctx).map_err(|err| {
            metrics::record_dispatch(DispatchOutcome::Unhandled);
            err
        })?;
        let halt = handled || halt_policy;

        metrics::record_dispatch(outcome);
        warn!(
            errno = code,
            error = ctx.error().unwrap_or_default(),
            halt,
            "request rejected"
        );

        Ok(Dispatched {
            context: ctx,
            status: DispatchStatus::Rejected { code, halt },
        })
    }
}

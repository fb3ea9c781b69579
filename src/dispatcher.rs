use crate::{
	middleware::run_chain, DefaultResponder, Flow, Hook, Locator, Request, Responder, Response,
	RouteMatch, RouteTable,
};
use anyhow::{Context, Result};
use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};
use tracing::{debug, error, warn};

/// How a dispatched request ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
	/// The matched action ran.
	Handled,
	/// A global or route hook stopped the request and wrote its own response.
	Halted,
	/// Nothing matched, or the matched action does not exist or takes a different number of
	/// arguments than the route captures.
	NotFound,
	/// The route's handler or one of its middleware could not be resolved.
	InternalError,
}

/// Configures a [`Dispatcher`]. The route table is frozen once `build` is called.
pub struct DispatcherBuilder {
	routes: RouteTable,
	locator: Arc<dyn Locator>,
	responder: Option<Arc<dyn Responder>>,
	hooks: Vec<Arc<dyn Hook>>,
}

impl DispatcherBuilder {
	/// Replaces the [`DefaultResponder`].
	pub fn responder(mut self, responder: impl Responder + 'static) -> Self {
		self.responder = Some(Arc::new(responder));
		self
	}

	/// Adds a global hook. Global hooks run in the order added, before route matching.
	pub fn hook(mut self, hook: impl Hook + 'static) -> Self {
		self.hooks.push(Arc::new(hook));
		self
	}

	pub fn hook_fn<F>(self, hook: F) -> Self
	where
		F: Fn(&Request, &mut Response) -> Result<Flow> + Send + Sync + 'static,
	{
		self.hook(hook)
	}

	pub fn build(self) -> Dispatcher {
		Dispatcher {
			routes: Arc::new(self.routes),
			locator: self.locator,
			responder: self
				.responder
				.unwrap_or_else(|| Arc::new(DefaultResponder::default())),
			hooks: self.hooks,
		}
	}
}

/// Drives a request from method and path to an action, or to a not-found/internal-error response.
///
/// A dispatcher only reads its route table, so one instance can be shared between threads.
pub struct Dispatcher {
	routes: Arc<RouteTable>,
	locator: Arc<dyn Locator>,
	responder: Arc<dyn Responder>,
	hooks: Vec<Arc<dyn Hook>>,
}

impl Debug for Dispatcher {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dispatcher")
			.field("routes", &self.routes)
			.field("hooks", &self.hooks.len())
			.finish()
	}
}

impl Dispatcher {
	pub fn builder(routes: RouteTable, locator: impl Locator + 'static) -> DispatcherBuilder {
		DispatcherBuilder {
			routes,
			locator: Arc::new(locator),
			responder: None,
			hooks: Vec::new(),
		}
	}

	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	/// Dispatches one request, writing into `res`.
	///
	/// Unmatched routes, missing actions and unresolvable handlers are answered through the
	/// responder and reported as an [`Outcome`]. Errors returned by the locator, by hooks or by
	/// the action itself are passed back to the caller untouched, and `res` may then hold a
	/// partial response.
	pub fn dispatch(&self, req: &Request, res: &mut Response) -> Result<Outcome> {
		if run_chain(&self.hooks, req, res).context("global hook failed")? == Flow::Halt {
			debug!(method = %req.method(), path = %req.path(), "request halted by global hook");
			return Ok(Outcome::Halted);
		}

		let RouteMatch { route, params } = match self.routes.find(req.method(), req.path()) {
			Some(found) => found,
			None => {
				debug!(method = %req.method(), path = %req.path(), "no route matched");
				self.responder.not_found(req, res);
				return Ok(Outcome::NotFound);
			}
		};
		debug!(
			method = %req.method(),
			path = %req.path(),
			template = %route.template(),
			"route matched"
		);

		for name in route.middleware() {
			let hook = match self.locator.hook(name)? {
				Some(hook) => hook,
				None => {
					error!(middleware = %name, template = %route.template(), "middleware is not registered");
					self.responder.internal_error(req, res);
					return Ok(Outcome::InternalError);
				}
			};

			let flow = hook
				.handle(req, res)
				.with_context(|| format!("middleware `{}` failed", name))?;
			if flow == Flow::Halt {
				debug!(middleware = %name, path = %req.path(), "request halted by route middleware");
				return Ok(Outcome::Halted);
			}
		}

		let target = route.handler();
		let handler = match self.locator.handler(&target.handler)? {
			Some(handler) => handler,
			None => {
				error!(handler = %target.handler, "handler is not registered");
				self.responder.internal_error(req, res);
				return Ok(Outcome::InternalError);
			}
		};

		let args = params.into_values();
		match handler.arity(&target.action) {
			Some(arity) if arity == args.len() => {}
			Some(arity) => {
				warn!(
					handler = %target.handler,
					action = %target.action,
					expected = arity,
					captured = args.len(),
					"action takes a different number of arguments than the route captures"
				);
				self.responder.not_found(req, res);
				return Ok(Outcome::NotFound);
			}
			None => {
				warn!(handler = %target.handler, action = %target.action, "action does not exist");
				self.responder.not_found(req, res);
				return Ok(Outcome::NotFound);
			}
		}

		handler
			.invoke(&target.action, req, &args, res)
			.with_context(|| format!("action `{}` failed", target))?;

		Ok(Outcome::Handled)
	}

	/// Dispatches one request and always produces a response: any error escaping
	/// [`dispatch`](Self::dispatch) is logged and answered with the internal-error response.
	pub fn handle(&self, req: &Request) -> Response {
		let mut res = Response::new();

		if let Err(e) = self.dispatch(req, &mut res) {
			error!(method = %req.method(), path = %req.path(), error = ?e, "error dispatching request");
			res.clear();
			self.responder.internal_error(req, &mut res);
		}

		res
	}
}

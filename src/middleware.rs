use crate::{Request, Response};
use anyhow::Result;
use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};
use tracing::debug;

/// What a hook decided about the request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
	/// Carry on with the next hook, or with the handler.
	Continue,
	/// Stop here. The hook has already written whatever response the client should get.
	Halt,
}

/// A pre-dispatch check.
///
/// Hooks run either globally, before route matching, or per route, before the handler. Halting is
/// a normal way to finish a request; errors are reserved for failures.
pub trait Hook: Send + Sync {
	fn handle(&self, req: &Request, res: &mut Response) -> Result<Flow>;
}

impl<F> Hook for F
where
	F: Fn(&Request, &mut Response) -> Result<Flow> + Send + Sync,
{
	fn handle(&self, req: &Request, res: &mut Response) -> Result<Flow> {
		self(req, res)
	}
}

/// Runs `hooks` in order until one of them halts.
pub fn run_chain(hooks: &[Arc<dyn Hook>], req: &Request, res: &mut Response) -> Result<Flow> {
	for hook in hooks {
		if hook.handle(req, res)? == Flow::Halt {
			return Ok(Flow::Halt);
		}
	}

	Ok(Flow::Continue)
}

/// Redirects every request its predicate rejects, e.g. sending signed-out visitors to a login page.
///
/// ```
/// use waymark::{Flow, Guard, Hook, Request, Response};
///
/// let signed_in = Guard::new("/auth/login", |req: &Request| req.header("x-user").is_some());
///
/// let mut res = Response::new();
/// let flow = signed_in.handle(&Request::new("GET", "/"), &mut res).unwrap();
///
/// assert_eq!(flow, Flow::Halt);
/// assert_eq!(res.header("Location"), Some("/auth/login"));
/// ```
pub struct Guard<P> {
	redirect_to: String,
	predicate: P,
}

impl<P> Guard<P> {
	pub fn new(redirect_to: impl Into<String>, predicate: P) -> Self
	where
		P: Fn(&Request) -> bool + Send + Sync,
	{
		Self {
			redirect_to: redirect_to.into(),
			predicate,
		}
	}
}

impl<P> Debug for Guard<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Guard")
			.field("redirect_to", &self.redirect_to)
			.finish()
	}
}

impl<P> Hook for Guard<P>
where
	P: Fn(&Request) -> bool + Send + Sync,
{
	fn handle(&self, req: &Request, res: &mut Response) -> Result<Flow> {
		if (self.predicate)(req) {
			return Ok(Flow::Continue);
		}

		debug!(path = %req.path(), location = %self.redirect_to, "guard redirected request");
		res.redirect(&self.redirect_to);
		Ok(Flow::Halt)
	}
}

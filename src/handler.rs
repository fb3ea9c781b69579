use crate::{Request, Response};
use anyhow::{anyhow, Result};
use std::{
	collections::HashMap,
	fmt::{self, Debug, Formatter},
};

/// Something a route can dispatch to: a set of named actions, each taking a fixed number of
/// positional string arguments.
///
/// The dispatcher checks [`Handler::arity`] before calling [`Handler::invoke`], so `invoke` is only
/// reached with an action that exists and exactly as many arguments as it declared.
pub trait Handler: Send + Sync {
	/// The number of arguments `action` takes, or `None` if there is no such action.
	fn arity(&self, action: &str) -> Option<usize>;

	fn invoke(&self, action: &str, req: &Request, args: &[String], res: &mut Response) -> Result<()>;
}

type ActionFn = dyn Fn(&Request, &[String], &mut Response) -> Result<()> + Send + Sync;

struct Action {
	arity: usize,
	run: Box<ActionFn>,
}

/// A [`Handler`] assembled from closures.
///
/// ```
/// use waymark::{Controller, Handler};
///
/// let auth = Controller::new()
/// 	.action("login", 0, |_req, _args, res| {
/// 		res.write("login form");
/// 		Ok(())
/// 	})
/// 	.action("new_password", 1, |_req, args, res| {
/// 		res.write(&format!("reset token {}", args[0]));
/// 		Ok(())
/// 	});
///
/// assert_eq!(auth.arity("new_password"), Some(1));
/// assert_eq!(auth.arity("register"), None);
/// ```
#[derive(Default)]
pub struct Controller {
	actions: HashMap<String, Action>,
}

impl Controller {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an action; a later action with the same name replaces the earlier one.
	pub fn action<F>(mut self, name: impl Into<String>, arity: usize, run: F) -> Self
	where
		F: Fn(&Request, &[String], &mut Response) -> Result<()> + Send + Sync + 'static,
	{
		self.actions.insert(
			name.into(),
			Action {
				arity,
				run: Box::new(run),
			},
		);
		self
	}

	pub fn actions(&self) -> impl Iterator<Item = &str> {
		self.actions.keys().map(String::as_str)
	}
}

impl Debug for Controller {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut actions: Vec<_> = self
			.actions
			.iter()
			.map(|(name, action)| (name.as_str(), action.arity))
			.collect();
		actions.sort_unstable();

		f.debug_struct("Controller").field("actions", &actions).finish()
	}
}

impl Handler for Controller {
	fn arity(&self, action: &str) -> Option<usize> {
		self.actions.get(action).map(|action| action.arity)
	}

	fn invoke(&self, action: &str, req: &Request, args: &[String], res: &mut Response) -> Result<()> {
		let entry = self
			.actions
			.get(action)
			.ok_or_else(|| anyhow!("controller has no action `{}`", action))?;

		(entry.run)(req, args, res)
	}
}

#[cfg(test)]
mod test {
	use super::{Controller, Handler};
	use crate::{Request, Response};
	use anyhow::bail;

	fn users() -> Controller {
		Controller::new()
			.action("index", 0, |_req, _args, res| {
				res.write("all users");
				Ok(())
			})
			.action("show", 1, |_req, args, res| {
				res.write(&format!("user {}", args[0]));
				Ok(())
			})
			.action("destroy", 1, |_req, _args, _res| bail!("database unavailable"))
	}

	#[test]
	fn reports_arity_per_action() {
		let users = users();

		assert_eq!(users.arity("index"), Some(0));
		assert_eq!(users.arity("show"), Some(1));
		assert_eq!(users.arity("edit"), None);

		let mut names: Vec<_> = users.actions().collect();
		names.sort_unstable();
		assert_eq!(names, vec!["destroy", "index", "show"]);
	}

	#[test]
	fn invokes_with_positional_arguments() {
		let users = users();
		let req = Request::new("GET", "/users/7");
		let mut res = Response::new();

		users.invoke("show", &req, &["7".to_string()], &mut res).unwrap();
		assert_eq!(res.body(), "user 7");
	}

	#[test]
	fn surfaces_action_errors() {
		let users = users();
		let req = Request::new("DELETE", "/users/7");
		let mut res = Response::new();

		let err = users
			.invoke("destroy", &req, &["7".to_string()], &mut res)
			.unwrap_err();
		assert_eq!(err.to_string(), "database unavailable");

		assert!(users.invoke("edit", &req, &[], &mut res).is_err());
	}

	#[test]
	fn later_actions_replace_earlier_ones() {
		let controller = Controller::new()
			.action("index", 0, |_req, _args, _res| Ok(()))
			.action("index", 2, |_req, _args, _res| Ok(()));

		assert_eq!(controller.arity("index"), Some(2));
	}
}

use crate::{pattern::Params, HandlerRef, Method, Route, RouteError};
use std::collections::HashMap;
use tracing::debug;

/// Routes keyed by method, each list kept in registration order.
///
/// A table is filled once while the application defines its routes and is then handed to the
/// [`Dispatcher`](crate::Dispatcher), which only ever reads it.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
	routes: HashMap<Method, Vec<Route>>,
}

/// A successful lookup: the route that matched and the values its placeholders captured.
#[derive(Debug)]
pub struct RouteMatch<'a> {
	pub route: &'a Route,
	pub params: Params,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_route(
		&mut self,
		method: Method,
		template: &str,
		handler: impl Into<HandlerRef>,
	) -> Result<&mut Self, RouteError> {
		self.add_route_with(method, template, handler, Vec::<String>::new())
	}

	/// Appends a route that runs the given middleware, in order, before its handler.
	///
	/// Registering the same method and template twice keeps both routes; lookups always reach the
	/// first one.
	pub fn add_route_with<I, S>(
		&mut self,
		method: Method,
		template: &str,
		handler: impl Into<HandlerRef>,
		middleware: I,
	) -> Result<&mut Self, RouteError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let route = Route::new(
			method,
			template,
			handler.into(),
			middleware.into_iter().map(Into::into).collect(),
		)?;

		debug!(
			method = %method,
			template = %route.template(),
			handler = %route.handler(),
			"registered route"
		);

		self.routes.entry(method).or_default().push(route);
		Ok(self)
	}

	/// Registers every route defined in `define` under a shared path prefix.
	pub fn group<F>(&mut self, prefix: &str, define: F) -> Result<&mut Self, RouteError>
	where
		F: FnOnce(&mut RouteGroup<'_>) -> Result<(), RouteError>,
	{
		let mut group = RouteGroup {
			table: &mut *self,
			prefix: join(prefix, "/"),
		};
		define(&mut group)?;
		Ok(self)
	}

	pub fn routes_for(&self, method: Method) -> &[Route] {
		self.routes.get(&method).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn len(&self) -> usize {
		self.routes.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Finds the first route registered for `method` whose template matches `path`.
	///
	/// `method` must be spelled exactly as registered; anything that is not a known uppercase
	/// method simply matches nothing.
	pub fn find(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
		let method = method.parse::<Method>().ok()?;

		self.routes_for(method).iter().find_map(|route| {
			route
				.pattern()
				.captures(path)
				.map(|params| RouteMatch { route, params })
		})
	}
}

/// Registers routes into a [`RouteTable`] under a path prefix. See [`RouteTable::group`].
#[derive(Debug)]
pub struct RouteGroup<'a> {
	table: &'a mut RouteTable,
	prefix: String,
}

impl<'a> RouteGroup<'a> {
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn add_route(
		&mut self,
		method: Method,
		template: &str,
		handler: impl Into<HandlerRef>,
	) -> Result<&mut Self, RouteError> {
		self.add_route_with(method, template, handler, Vec::<String>::new())
	}

	pub fn add_route_with<I, S>(
		&mut self,
		method: Method,
		template: &str,
		handler: impl Into<HandlerRef>,
		middleware: I,
	) -> Result<&mut Self, RouteError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let template = join(&self.prefix, template);
		self.table
			.add_route_with(method, &template, handler, middleware)?;
		Ok(self)
	}

	pub fn group<F>(&mut self, prefix: &str, define: F) -> Result<&mut Self, RouteError>
	where
		F: FnOnce(&mut RouteGroup<'_>) -> Result<(), RouteError>,
	{
		let mut group = RouteGroup {
			table: &mut *self.table,
			prefix: join(&self.prefix, prefix),
		};
		define(&mut group)?;
		Ok(self)
	}
}

/// Joins a group prefix and a route template. A template of `/` names the prefix itself.
fn join(prefix: &str, template: &str) -> String {
	let base = prefix.trim_end_matches('/');

	if template == "/" || template.is_empty() {
		if base.is_empty() {
			"/".to_owned()
		} else {
			base.to_owned()
		}
	} else if template.starts_with('/') {
		format!("{}{}", base, template)
	} else {
		format!("{}/{}", base, template)
	}
}

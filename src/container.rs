use crate::{Flow, Handler, Hook, Request, Response};
use anyhow::{Context, Result};
use std::{
	collections::HashMap,
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

/// Turns the identifiers stored on routes into live handlers and middleware.
///
/// `Ok(None)` means nothing is registered under that name; an `Err` means the locator itself
/// failed while building the instance.
pub trait Locator: Send + Sync {
	fn handler(&self, name: &str) -> Result<Option<Arc<dyn Handler>>>;

	fn hook(&self, name: &str) -> Result<Option<Arc<dyn Hook>>>;
}

type Factory<T> = Box<dyn Fn(&Container) -> Result<Arc<T>> + Send + Sync>;

enum Binding<T: ?Sized> {
	Shared(Arc<T>),
	Factory(Factory<T>),
}

impl<T: ?Sized> Binding<T> {
	fn resolve(&self, container: &Container) -> Result<Arc<T>> {
		match self {
			Binding::Shared(instance) => Ok(Arc::clone(instance)),
			Binding::Factory(factory) => factory(container),
		}
	}
}

/// An explicit registry of handlers and middleware, keyed by the identifiers routes refer to.
///
/// Names can be bound to a shared instance, or to a factory that builds a fresh instance for each
/// request. Factories receive the container so they can look up what they depend on.
///
/// ```
/// use waymark::{Container, Controller, Locator};
///
/// let mut container = Container::new();
/// container.handler_instance("app", Controller::new().action("index", 0, |_, _, res| {
/// 	res.write("home");
/// 	Ok(())
/// }));
///
/// assert!(container.has_handler("app"));
/// assert!(container.handler("app").unwrap().is_some());
/// assert!(container.handler("missing").unwrap().is_none());
/// ```
#[derive(Default)]
pub struct Container {
	handlers: HashMap<String, Binding<dyn Handler>>,
	hooks: HashMap<String, Binding<dyn Hook>>,
}

impl Container {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn handler_instance<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
	where
		H: Handler + 'static,
	{
		self.handlers
			.insert(name.into(), Binding::Shared(Arc::new(handler)));
		self
	}

	pub fn bind_handler<F, H>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
	where
		F: Fn(&Container) -> Result<H> + Send + Sync + 'static,
		H: Handler + 'static,
	{
		let factory: Factory<dyn Handler> =
			Box::new(move |container| Ok(Arc::new(factory(container)?) as Arc<dyn Handler>));
		self.handlers.insert(name.into(), Binding::Factory(factory));
		self
	}

	pub fn hook_instance<H>(&mut self, name: impl Into<String>, hook: H) -> &mut Self
	where
		H: Hook + 'static,
	{
		self.hooks.insert(name.into(), Binding::Shared(Arc::new(hook)));
		self
	}

	/// Registers a closure as a shared middleware instance.
	pub fn hook_fn<F>(&mut self, name: impl Into<String>, hook: F) -> &mut Self
	where
		F: Fn(&Request, &mut Response) -> Result<Flow> + Send + Sync + 'static,
	{
		self.hook_instance(name, hook)
	}

	pub fn bind_hook<F, H>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
	where
		F: Fn(&Container) -> Result<H> + Send + Sync + 'static,
		H: Hook + 'static,
	{
		let factory: Factory<dyn Hook> =
			Box::new(move |container| Ok(Arc::new(factory(container)?) as Arc<dyn Hook>));
		self.hooks.insert(name.into(), Binding::Factory(factory));
		self
	}

	pub fn has_handler(&self, name: &str) -> bool {
		self.handlers.contains_key(name)
	}

	pub fn has_hook(&self, name: &str) -> bool {
		self.hooks.contains_key(name)
	}
}

impl Debug for Container {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut handlers: Vec<_> = self.handlers.keys().collect();
		let mut hooks: Vec<_> = self.hooks.keys().collect();
		handlers.sort_unstable();
		hooks.sort_unstable();

		f.debug_struct("Container")
			.field("handlers", &handlers)
			.field("hooks", &hooks)
			.finish()
	}
}

impl Locator for Container {
	fn handler(&self, name: &str) -> Result<Option<Arc<dyn Handler>>> {
		match self.handlers.get(name) {
			Some(binding) => binding
				.resolve(self)
				.map(Some)
				.with_context(|| format!("failed to build handler `{}`", name)),
			None => Ok(None),
		}
	}

	fn hook(&self, name: &str) -> Result<Option<Arc<dyn Hook>>> {
		match self.hooks.get(name) {
			Some(binding) => binding
				.resolve(self)
				.map(Some)
				.with_context(|| format!("failed to build middleware `{}`", name)),
			None => Ok(None),
		}
	}
}

use crate::{pattern::PathPattern, RouteError};
use serde::Deserialize;
use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

/// The HTTP methods a route can be registered for.
///
/// Methods are always spelled in uppercase; parsing is exact, so `"get"` is rejected rather than
/// normalized. Callers normalize before registering and before matching.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Head,
	Post,
	Put,
	Patch,
	Delete,
	Options,
}

impl Method {
	pub const ALL: [Method; 7] = [
		Method::Get,
		Method::Head,
		Method::Post,
		Method::Put,
		Method::Patch,
		Method::Delete,
		Method::Options,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Head => "HEAD",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
			Method::Options => "OPTIONS",
		}
	}
}

impl FromStr for Method {
	type Err = RouteError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Method::ALL
			.iter()
			.copied()
			.find(|method| method.as_str() == s)
			.ok_or_else(|| RouteError::UnknownMethod(s.to_owned()))
	}
}

impl Display for Method {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Names the handler and the action on it that a route dispatches to.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HandlerRef {
	pub handler: String,
	pub action: String,
}

impl HandlerRef {
	pub fn new(handler: impl Into<String>, action: impl Into<String>) -> Self {
		Self {
			handler: handler.into(),
			action: action.into(),
		}
	}
}

impl<H: Into<String>, A: Into<String>> From<(H, A)> for HandlerRef {
	fn from((handler, action): (H, A)) -> Self {
		Self::new(handler, action)
	}
}

impl Display for HandlerRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.handler, self.action)
	}
}

/// A single registered endpoint.
#[derive(Debug, Clone)]
pub struct Route {
	method: Method,
	pattern: PathPattern,
	handler: HandlerRef,
	middleware: Vec<String>,
}

impl Route {
	pub fn new(
		method: Method,
		template: &str,
		handler: HandlerRef,
		middleware: Vec<String>,
	) -> Result<Self, RouteError> {
		Ok(Self {
			method,
			pattern: PathPattern::compile(template)?,
			handler,
			middleware,
		})
	}

	pub fn method(&self) -> Method {
		self.method
	}

	pub fn template(&self) -> &str {
		self.pattern.template()
	}

	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	pub fn handler(&self) -> &HandlerRef {
		&self.handler
	}

	/// Middleware identifiers to run, in order, before this route's handler.
	pub fn middleware(&self) -> &[String] {
		&self.middleware
	}
}

//! An ordered, first-match-wins HTTP route dispatcher.
//!
//! ```
//! use waymark::{Container, Controller, Dispatcher, Guard, Method, Request, RouteTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut routes = RouteTable::new();
//! routes
//! 	.add_route_with(Method::Get, "/", ("app", "index"), vec!["auth"])?
//! 	.group("/auth", |auth| {
//! 		auth.add_route(Method::Get, "/login", ("auth", "login"))?
//! 			.add_route(Method::Get, "/new-password/{token}", ("auth", "new_password"))?;
//! 		Ok(())
//! 	})?;
//!
//! let mut container = Container::new();
//! container
//! 	.handler_instance("app", Controller::new().action("index", 0, |_, _, res| {
//! 		res.write("dashboard");
//! 		Ok(())
//! 	}))
//! 	.handler_instance("auth", Controller::new()
//! 		.action("login", 0, |_, _, res| {
//! 			res.write("login form");
//! 			Ok(())
//! 		})
//! 		.action("new_password", 1, |_, args, res| {
//! 			res.write(&format!("reset {}", args[0]));
//! 			Ok(())
//! 		}))
//! 	.hook_instance("auth", Guard::new("/auth/login", |req: &Request| {
//! 		req.header("cookie").is_some()
//! 	}));
//!
//! let dispatcher = Dispatcher::builder(routes, container).build();
//!
//! let res = dispatcher.handle(&Request::new("GET", "/auth/new-password/abc123"));
//! assert_eq!(res.body(), "reset abc123");
//!
//! let res = dispatcher.handle(&Request::new("GET", "/"));
//! assert_eq!(res.header("Location"), Some("/auth/login"));
//!
//! let res = dispatcher.handle(&Request::new("GET", "/auth/new-password/abc/extra"));
//! assert_eq!(res.status(), 404);
//! # Ok(())
//! # }
//! ```
//!
//! Routes are tried in the order they were registered and the first whose method and path
//! template match wins; there is no notion of a more specific route. Register literal paths such
//! as `/users/new` before templates like `/users/{id}` that would also match them.
//!
//! Placeholders (`{name}`) capture one or more of `[A-Za-z0-9_]` and never span a `/`. Captured
//! values are passed to the action as positional arguments, in template order. A route whose
//! action is missing, or takes a different number of arguments than the route captures, is
//! answered like an unmatched route.
//!
//! With the `http` feature (on by default), [`HttpDispatcher`] serves a dispatcher through hyper.

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::*;

pub mod config;
mod container;
mod dispatcher;
mod error;
mod handler;
mod middleware;

/// Route template compilation and captured parameters.
pub mod pattern;

mod request;
mod responder;
mod response;
mod route;
mod table;

pub use config::{load_config, RoutesConfig};
pub use container::{Container, Locator};
pub use dispatcher::{Dispatcher, DispatcherBuilder, Outcome};
pub use error::{ConfigError, RouteError};
pub use handler::{Controller, Handler};
pub use middleware::{run_chain, Flow, Guard, Hook};
pub use pattern::{Params, PathPattern};
pub use request::Request;
pub use responder::{DefaultResponder, Responder};
pub use response::Response;
pub use route::{HandlerRef, Method, Route};
pub use table::{RouteGroup, RouteMatch, RouteTable};

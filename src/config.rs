//! Route definitions loaded from TOML.
//!
//! ```toml
//! [[routes]]
//! method = "GET"
//! path = "/"
//! handler = "app"
//! action = "index"
//! middleware = ["auth"]
//!
//! [[groups]]
//! prefix = "/auth"
//!
//! [[groups.routes]]
//! method = "GET"
//! path = "/new-password/{token}"
//! handler = "auth"
//! action = "new_password"
//!
//! [responses]
//! not_found = "Nothing here."
//! ```
//!
//! Top-level routes are registered first, then each group in file order. Within a group, its own
//! routes come before its nested groups.

use crate::{
	responder::{INTERNAL_ERROR_BODY, NOT_FOUND_BODY},
	ConfigError, DefaultResponder, HandlerRef, Method, RouteError, RouteGroup, RouteTable,
};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
	pub routes: Vec<RouteConfig>,
	pub groups: Vec<GroupConfig>,
	pub responses: ResponsesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
	pub method: Method,
	pub path: String,
	pub handler: String,
	pub action: String,
	#[serde(default)]
	pub middleware: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
	pub prefix: String,
	#[serde(default)]
	pub routes: Vec<RouteConfig>,
	#[serde(default)]
	pub groups: Vec<GroupConfig>,
}

/// Bodies written by the [`DefaultResponder`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResponsesConfig {
	pub not_found: String,
	pub internal_error: String,
}

impl Default for ResponsesConfig {
	fn default() -> Self {
		Self {
			not_found: NOT_FOUND_BODY.to_owned(),
			internal_error: INTERNAL_ERROR_BODY.to_owned(),
		}
	}
}

impl RouteConfig {
	fn target(&self) -> HandlerRef {
		HandlerRef::new(self.handler.as_str(), self.action.as_str())
	}
}

impl RoutesConfig {
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Appends every configured route to `table`.
	pub fn register(&self, table: &mut RouteTable) -> Result<(), RouteError> {
		for route in &self.routes {
			table.add_route_with(
				route.method,
				&route.path,
				route.target(),
				route.middleware.iter().cloned(),
			)?;
		}

		for group in &self.groups {
			table.group(&group.prefix, |routes| register_group(routes, group))?;
		}

		Ok(())
	}

	/// Builds a fresh table holding only the configured routes.
	pub fn route_table(&self) -> Result<RouteTable, RouteError> {
		let mut table = RouteTable::new();
		self.register(&mut table)?;
		Ok(table)
	}

	pub fn responder(&self) -> DefaultResponder {
		DefaultResponder::with_bodies(
			self.responses.not_found.as_str(),
			self.responses.internal_error.as_str(),
		)
	}
}

fn register_group(routes: &mut RouteGroup<'_>, group: &GroupConfig) -> Result<(), RouteError> {
	for route in &group.routes {
		routes.add_route_with(
			route.method,
			&route.path,
			route.target(),
			route.middleware.iter().cloned(),
		)?;
	}

	for nested in &group.groups {
		routes.group(&nested.prefix, |routes| register_group(routes, nested))?;
	}

	Ok(())
}

/// Reads and parses a route configuration file.
pub fn load_config(path: &Path) -> Result<RoutesConfig, ConfigError> {
	let content = fs::read_to_string(path)?;
	let config = RoutesConfig::from_toml(&content)?;

	debug!(
		path = %path.display(),
		routes = config.routes.len(),
		groups = config.groups.len(),
		"loaded route config"
	);
	Ok(config)
}

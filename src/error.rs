use std::io;
use thiserror::Error;

/// Raised while registering routes. Registration happens once at startup, so any of these should
/// abort the application rather than silently dropping the route.
#[derive(Debug, Error)]
pub enum RouteError {
	#[error("unsupported HTTP method `{0}`")]
	UnknownMethod(String),

	#[error("unclosed `{{` at byte {position} in route template `{template}`")]
	UnclosedBrace { template: String, position: usize },

	#[error("unexpected `}}` at byte {position} in route template `{template}`")]
	UnexpectedBrace { template: String, position: usize },

	#[error("empty placeholder at byte {position} in route template `{template}`")]
	EmptyPlaceholder { template: String, position: usize },

	#[error("invalid placeholder name `{name}` in route template `{template}`")]
	InvalidPlaceholder { template: String, name: String },

	#[error("placeholder `{name}` appears more than once in route template `{template}`")]
	DuplicatePlaceholder { template: String, name: String },

	#[error("route template `{template}` could not be compiled")]
	Pattern {
		template: String,
		#[source]
		source: regex::Error,
	},
}

/// Raised while loading a route configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("unable to read route config: {0}")]
	Io(#[from] io::Error),

	#[error("unable to parse route config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error(transparent)]
	Route(#[from] RouteError),
}

/// The parts of an incoming request the dispatcher and its collaborators look at.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Request {
	method: String,
	path: String,
	query: Option<String>,
	headers: Vec<(String, String)>,
}

impl Request {
	/// Builds a request from a method and a request target such as `/users/7?tab=posts`.
	///
	/// The query string is split off so only the path takes part in route matching.
	pub fn new(method: impl Into<String>, target: &str) -> Self {
		let (path, query) = match target.find('?') {
			Some(idx) => (&target[..idx], Some(target[idx + 1..].to_owned())),
			None => (target, None),
		};

		Self {
			method: method.into(),
			path: path.to_owned(),
			query,
			headers: Vec::new(),
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn query(&self) -> Option<&str> {
		self.query.as_deref()
	}

	/// The first header named `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
		self.headers
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}
}

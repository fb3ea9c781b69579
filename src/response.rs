/// The response actions and hooks write into while a request is dispatched.
///
/// A fresh response carries status 200, no headers and an empty body.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Response {
	status: u16,
	headers: Vec<(String, String)>,
	body: String,
}

impl Default for Response {
	fn default() -> Self {
		Self {
			status: 200,
			headers: Vec::new(),
			body: String::new(),
		}
	}
}

impl Response {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn status(&self) -> u16 {
		self.status
	}

	pub fn set_status(&mut self, status: u16) -> &mut Self {
		self.status = status;
		self
	}

	/// Sets a header, replacing any existing header of the same name.
	pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let name = name.into();
		self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
		self.headers.push((name, value.into()));
		self
	}

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

	/// Appends to the body.
	pub fn write(&mut self, chunk: &str) -> &mut Self {
		self.body.push_str(chunk);
		self
	}

	/// Replaces the body, dropping anything written before.
	pub fn set_body(&mut self, body: &str) -> &mut Self {
		self.body.clear();
		self.write(body)
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn into_body(self) -> String {
		self.body
	}

	/// Turns the response into a `302 Found` pointing at `location`.
	pub fn redirect(&mut self, location: &str) -> &mut Self {
		self.set_status(302).set_header("Location", location)
	}

	/// Discards everything written so far.
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

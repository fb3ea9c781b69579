use crate::{Request, Response};

pub const NOT_FOUND_BODY: &str = "404 Not Found";
pub const INTERNAL_ERROR_BODY: &str = "500 Internal Server Error";

/// Writes the responses for requests the dispatcher could not hand to an action.
pub trait Responder: Send + Sync {
	fn not_found(&self, req: &Request, res: &mut Response);

	fn internal_error(&self, req: &Request, res: &mut Response);
}

/// Plain-text 404 and 500 responses. Any body already written by a hook is replaced; headers are
/// kept.
#[derive(Debug, Clone)]
pub struct DefaultResponder {
	not_found: String,
	internal_error: String,
}

impl Default for DefaultResponder {
	fn default() -> Self {
		Self {
			not_found: NOT_FOUND_BODY.to_owned(),
			internal_error: INTERNAL_ERROR_BODY.to_owned(),
		}
	}
}

impl DefaultResponder {
	pub fn with_bodies(not_found: impl Into<String>, internal_error: impl Into<String>) -> Self {
		Self {
			not_found: not_found.into(),
			internal_error: internal_error.into(),
		}
	}
}

impl Responder for DefaultResponder {
	fn not_found(&self, _req: &Request, res: &mut Response) {
		res.set_status(404)
			.set_header("Content-Type", "text/plain; charset=utf-8")
			.set_body(&self.not_found);
	}

	fn internal_error(&self, _req: &Request, res: &mut Response) {
		res.set_status(500)
			.set_header("Content-Type", "text/plain; charset=utf-8")
			.set_body(&self.internal_error);
	}
}

#[cfg(test)]
mod test {
	use super::{DefaultResponder, Responder};
	use crate::{Request, Response};

	#[test]
	fn writes_conventional_statuses() {
		let responder = DefaultResponder::default();
		let req = Request::new("GET", "/missing");

		let mut res = Response::new();
		responder.not_found(&req, &mut res);
		assert_eq!(res.status(), 404);
		assert_eq!(res.body(), "404 Not Found");

		let mut res = Response::new();
		responder.internal_error(&req, &mut res);
		assert_eq!(res.status(), 500);
		assert_eq!(res.body(), "500 Internal Server Error");
		assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
	}

	#[test]
	fn bodies_can_be_replaced() {
		let responder = DefaultResponder::with_bodies("nothing here", "oops");
		let req = Request::new("GET", "/");
		let mut res = Response::new();

		responder.not_found(&req, &mut res);
		assert_eq!(res.body(), "nothing here");
	}

	#[test]
	fn replaces_partial_bodies() {
		let responder = DefaultResponder::default();
		let req = Request::new("GET", "/missing");

		let mut res = Response::new();
		res.set_header("X-Request-Id", "r1").write("<banner>");
		responder.not_found(&req, &mut res);

		assert_eq!(res.status(), 404);
		assert_eq!(res.body(), "404 Not Found");
		assert_eq!(res.header("x-request-id"), Some("r1"));
	}
}

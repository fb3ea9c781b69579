use crate::{Dispatcher, Request, Response};
use hyper::{
	body::Body,
	http::{response::Builder, StatusCode},
	service::Service,
};
use std::{
	convert::Infallible,
	future::{ready, Ready},
	sync::Arc,
	task::{Context, Poll},
};
use tracing::{debug, error};

pub use hyper;

/// Serves a [`Dispatcher`] through hyper: pass it to `Server::serve`.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
	dispatcher: Arc<Dispatcher>,
}

impl From<Dispatcher> for HttpDispatcher {
	fn from(dispatcher: Dispatcher) -> Self {
		Self::from(Arc::new(dispatcher))
	}
}

impl From<Arc<Dispatcher>> for HttpDispatcher {
	fn from(dispatcher: Arc<Dispatcher>) -> Self {
		Self { dispatcher }
	}
}

impl<T> Service<T> for HttpDispatcher {
	type Response = DispatchService;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, _: T) -> Self::Future {
		ready(Ok(DispatchService {
			dispatcher: Arc::clone(&self.dispatcher),
		}))
	}
}

/// Handles the requests of a single connection.
#[derive(Debug, Clone)]
pub struct DispatchService {
	dispatcher: Arc<Dispatcher>,
}

impl Service<hyper::Request<Body>> for DispatchService {
	type Response = hyper::Response<Body>;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, req: hyper::Request<Body>) -> Self::Future {
		let request = to_request(&req);
		let response = self.dispatcher.handle(&request);
		ready(Ok(to_hyper(response)))
	}
}

fn to_request(req: &hyper::Request<Body>) -> Request {
	let target = match req.uri().path_and_query() {
		Some(target) => target.as_str(),
		None => req.uri().path(),
	};

	req.headers()
		.iter()
		.filter_map(|(name, value)| match value.to_str() {
			Ok(value) => Some((name.as_str(), value)),
			Err(_) => {
				debug!(header = %name, "dropping header with a non-ASCII value");
				None
			}
		})
		.fold(Request::new(req.method().as_str(), target), |request, (name, value)| {
			request.with_header(name, value)
		})
}

fn to_hyper(res: Response) -> hyper::Response<Body> {
	let status = res.status();
	let builder = res
		.headers()
		.fold(Builder::default().status(status), |builder, (name, value)| {
			builder.header(name, value)
		});

	match builder.body(Body::from(res.into_body())) {
		Ok(response) => response,
		Err(e) => {
			error!(status, error = %e, "response could not be converted");
			let mut response = hyper::Response::new(Body::empty());
			*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
			response
		}
	}
}

#[cfg(test)]
mod test {
	use super::{DispatchService, HttpDispatcher};
	use crate::{Container, Controller, Dispatcher, Guard, Method, Request, RouteTable};
	use hyper::{body::to_bytes, header::HeaderValue, service::Service, Body, StatusCode};

	async fn service() -> DispatchService {
		let mut routes = RouteTable::new();
		routes
			.add_route(Method::Get, "/new-password/{token}", ("auth", "new_password"))
			.unwrap()
			.add_route_with(Method::Get, "/", ("app", "index"), vec!["auth"])
			.unwrap();

		let mut container = Container::new();
		container
			.handler_instance(
				"auth",
				Controller::new().action("new_password", 1, |req, args, res| {
					res.set_header("X-Query", req.query().unwrap_or_default())
						.write(&format!("token {}", args[0]));
					Ok(())
				}),
			)
			.handler_instance("app", Controller::new().action("index", 0, |_, _, _| Ok(())))
			.hook_instance(
				"auth",
				Guard::new("/auth/login", |req: &Request| req.header("cookie").is_some()),
			);

		let mut make = HttpDispatcher::from(Dispatcher::builder(routes, container).build());
		make.call(()).await.unwrap()
	}

	fn get(uri: &str) -> hyper::Request<Body> {
		hyper::Request::get(uri).body(Body::empty()).unwrap()
	}

	#[tokio::test]
	async fn serves_matched_routes() {
		let mut service = service().await;

		let res = service.call(get("/new-password/abc123?lang=pt")).await.unwrap();
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.headers()["x-query"], "lang=pt");

		let body = to_bytes(res.into_body()).await.unwrap();
		assert_eq!(&body[..], b"token abc123");
	}

	#[tokio::test]
	async fn unmatched_routes_are_404() {
		let mut service = service().await;

		let res = service.call(get("/new-password/abc/extra")).await.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_FOUND);

		let body = to_bytes(res.into_body()).await.unwrap();
		assert_eq!(&body[..], b"404 Not Found");
	}

	#[tokio::test]
	async fn request_headers_reach_hooks() {
		let mut service = service().await;

		let res = service.call(get("/")).await.unwrap();
		assert_eq!(res.status(), StatusCode::FOUND);
		assert_eq!(res.headers()["location"], "/auth/login");

		let req = hyper::Request::get("/")
			.header("Cookie", "session=1")
			.body(Body::empty())
			.unwrap();
		let res = service.call(req).await.unwrap();
		assert_eq!(res.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn non_ascii_headers_are_dropped() {
		let mut service = service().await;

		let req = hyper::Request::get("/")
			.header("Cookie", HeaderValue::from_bytes(b"session=\xff").unwrap())
			.body(Body::empty())
			.unwrap();
		let res = service.call(req).await.unwrap();
		assert_eq!(res.status(), StatusCode::FOUND);
	}
}

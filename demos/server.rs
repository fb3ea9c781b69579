use std::{env, path::Path};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waymark::{
	hyper::Server, load_config, Container, Controller, Dispatcher, Guard, HttpDispatcher, Method,
	Request, RouteTable, RoutesConfig,
};

fn signed_in(req: &Request) -> bool {
	req.header("cookie")
		.map_or(false, |cookie| cookie.split(';').any(|pair| pair.trim().starts_with("usr_id=")))
}

fn default_routes() -> Result<RouteTable, waymark::RouteError> {
	let mut routes = RouteTable::new();
	routes
		.add_route_with(Method::Get, "/", ("app", "index"), vec!["auth"])?
		.group("/auth", |auth| {
			auth.add_route(Method::Get, "/login", ("auth", "login"))?
				.add_route(Method::Post, "/login", ("auth", "login"))?
				.add_route(Method::Get, "/new-password/{token}", ("auth", "new_password"))?
				.add_route(Method::Get, "/logout", ("auth", "logout"))?;
			Ok(())
		})?;
	Ok(routes)
}

fn container() -> Container {
	let mut container = Container::new();
	container
		.handler_instance(
			"app",
			Controller::new().action("index", 0, |_, _, res| {
				res.write("<h1>Dashboard</h1>");
				Ok(())
			}),
		)
		.handler_instance(
			"auth",
			Controller::new()
				.action("login", 0, |req, _, res| {
					if req.method() == "POST" {
						res.set_header("Set-Cookie", "usr_id=1; Path=/; HttpOnly")
							.redirect("/");
					} else {
						res.write("<form method=\"post\"><button>Sign in</button></form>");
					}
					Ok(())
				})
				.action("new_password", 1, |_, args, res| {
					res.write(&format!("<h1>Choose a new password</h1><p>token {}</p>", args[0]));
					Ok(())
				})
				.action("logout", 0, |_, _, res| {
					res.set_header("Set-Cookie", "usr_id=; Path=/; Max-Age=0")
						.redirect("/auth/login");
					Ok(())
				}),
		)
		.hook_instance("auth", Guard::new("/auth/login", signed_in));
	container
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "waymark=debug,server=debug".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let (routes, responder) = match env::args().nth(1) {
		Some(path) => {
			let config: RoutesConfig = load_config(Path::new(&path))?;
			(config.route_table()?, config.responder())
		}
		None => (default_routes()?, Default::default()),
	};
	tracing::info!(routes = routes.len(), "routes defined");

	let dispatcher = Dispatcher::builder(routes, container())
		.responder(responder)
		.hook_fn(|req, _| {
			tracing::info!(method = %req.method(), path = %req.path(), "request");
			Ok(waymark::Flow::Continue)
		})
		.build();

	let addr = ([127, 0, 0, 1], 3000).into();
	let server = Server::bind(&addr).serve(HttpDispatcher::from(dispatcher));
	tracing::info!(address = %addr, "listening");

	server.await?;
	Ok(())
}

use fresco::bootstrap::LoadRoutes;
use fresco::container::ContainerExt;
use fresco::definitions::{RouteFileDefinition, RoutingDefinitions};
use fresco::routing::Router;
use fresco::{Application, Request};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn request(method: &str, uri: &str) -> Request {
    Request::default().with_method(method).unwrap().with_uri(uri.parse().unwrap())
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/app");
    let app = Application::builder(root).bootstrapper::<LoadRoutes>().build();
    app.definitions(&[&RoutingDefinitions, &RouteFileDefinition]);

    if let Err(e) = app.bootstrap() {
        error!(cause = %e, "bootstrap failed");
        println!("{}", app.render_exception(&e).body());
        return;
    }

    let router = app.container().unwrap().resolve::<dyn Router>().unwrap();
    for (method, uri) in [("GET", "/"), ("GET", "/users/42"), ("POST", "/users"), ("DELETE", "/users")] {
        let request = request(method, uri);
        match router.resolve_request(&request) {
            Some(route_match) => {
                let request = route_match.apply(&request);
                info!(method, uri, action = route_match.route().action(), attributes = ?request.attributes(), "matched");
            }
            None => info!(method, uri, "no route"),
        }
    }
}

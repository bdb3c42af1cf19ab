use std::net::TcpListener;

use actix_web::{dev::Server, http::Method, middleware::DefaultHeaders, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{
    clients::{MailingListClient, WebinarClient},
    routes,
};

pub fn run(
    listener: TcpListener,
    webinar_client: web::Data<WebinarClient>,
    list_client: web::Data<MailingListClient>,
) -> Server {
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .app_data(webinar_client.clone())
            .app_data(list_client.clone())
            .route("/", web::get().to(routes::health_check))
            .service(
                web::resource("/register")
                    .route(web::post().to(routes::register))
                    .route(web::method(Method::OPTIONS).to(routes::register_preflight)),
            )
    })
    .listen(listener)
    .expect("failed to bind web port.")
    .run()
}

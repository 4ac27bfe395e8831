use std::{net::TcpListener, path::PathBuf};

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{analyze_route, ask_route, default_route},
    services::Analyzer,
};

pub fn run(
    listener: TcpListener,
    analyzer: Analyzer,
    public_dir: PathBuf,
) -> Result<Server, std::io::Error> {
    let analyzer = web::Data::new(analyzer);
    let serve_public = public_dir.is_dir();
    if !serve_public {
        log::warn!("Public directory {:?} not found, static files disabled", public_dir);
    }

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .service(default_route::health)
            .service(analyze_route::analyze)
            .service(ask_route::ask)
            .app_data(analyzer.clone());

        match serve_public {
            true => app.service(Files::new("/", &public_dir).index_file("index.html")),
            false => app,
        }
    })
    .listen(listener)?
    .run();

    Ok(server)
}

use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::path::PathBuf;

mod config;
mod error;
mod routes;
mod store;

use config::Config;
use store::Billing;

async fn index(client_dir: web::Data<PathBuf>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(client_dir.join("index.html"))?)
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::load();
    let billing = web::Data::new(Billing::open(&config.data_dir)?);
    let client_dir = web::Data::new(config.client_dir.clone());
    info!(
        "datos en {}, cliente en {}",
        config.data_dir.display(),
        config.client_dir.display()
    );

    let public = config.client_dir.join("public");
    let pkg = config.client_dir.join("pkg");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(billing.clone())
            .app_data(client_dir.clone())
            .service(routes::api())
            .service(Files::new("/public", public.clone()))
            .service(Files::new("/pkg", pkg.clone()))
            .default_service(web::route().to(index))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use notes_api::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("{e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let pool = notes_api::db::init_pool(&config.database_url).map_err(|e| {
        log::error!("Error opening database {}: {e}", config.database_url);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    log::info!("Database connected successfully ({})", config.database_url);

    log::info!("Server is running on http://0.0.0.0:{}", config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(notes_api::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}

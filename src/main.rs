use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;

use todo_api::auth::TokenService;
use todo_api::config::Config;
use todo_api::repository::InMemoryStore;
use todo_api::AppState;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_expiration_hours);

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|e| startup_error("Failed to connect to database", e))?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .map_err(|e| startup_error("Failed to run migrations", e))?;
            info!("Using PostgreSQL storage");
            AppState::postgres(pool, tokens, config.bcrypt_cost)
        }
        None => {
            warn!("DATABASE_URL is not set; data is kept in memory and lost on restart");
            AppState::in_memory(InMemoryStore::new(), tokens, config.bcrypt_cost)
        }
    };

    info!("Starting todo-api server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

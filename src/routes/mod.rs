pub mod auth;
pub mod health;
pub mod todos;

use actix_web::{error::Error as ActixError, web};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

fn bad_request(message: String) -> ActixError {
    AppError::BadRequest(message).into()
}

/// Registers every route. `/health`, `/register` and `/login` are public;
/// everything under `/todos` requires a bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::list_todos)
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}

use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new account and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: The email is already registered, or the input is invalid.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `401 Unauthorized`: Unknown email or wrong password.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

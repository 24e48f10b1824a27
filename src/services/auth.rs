use std::sync::Arc;

use log::{info, warn};
use validator::Validate;

use super::run_blocking;
use crate::auth::{hash_password, verify_password, LoginRequest, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::NewUser;
use crate::repository::UserRepository;

/// Registration and login.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService, hash_cost: u32) -> Self {
        Self {
            users,
            tokens,
            hash_cost,
        }
    }

    /// Creates an account with role `USER` and returns a token for it.
    pub async fn register(&self, request: RegisterRequest) -> Result<String, AppError> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            warn!("registration rejected: email already in use");
            return Err(AppError::DuplicateEmail);
        }

        let cost = self.hash_cost;
        let password = request.password;
        let password_hash = run_blocking(move || hash_password(&password, cost)).await?;

        let user = self
            .users
            .insert(NewUser::new(request.name, request.email, password_hash))
            .await?;
        info!("registered user {}", user.id);

        self.tokens.generate(&user)
    }

    /// Checks the password against the stored hash and returns a fresh token.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        let Some(user) = self.users.find_by_email(&request.email).await? else {
            warn!("login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let password = request.password;
        let stored_hash = user.password.clone();
        let matches = run_blocking(move || verify_password(&password, &stored_hash)).await?;
        if !matches {
            warn!("login failed for user {}: wrong password", user.id);
            return Err(AppError::InvalidCredentials);
        }

        info!("user {} logged in", user.id);
        self.tokens.generate(&user)
    }
}

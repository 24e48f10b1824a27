use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::auth::TokenService;
use crate::repository::{
    InMemoryStore, PgTodoRepository, PgUserRepository, TodoRepository, UserRepository,
};
use crate::routes;
use crate::services::{AuthService, TodoService};

/// Everything a worker needs: the services plus the token verifier used by
/// `AuthMiddleware`.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub todos: web::Data<TodoService>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
        tokens: TokenService,
        hash_cost: u32,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(users.clone(), tokens.clone(), hash_cost)),
            todos: web::Data::new(TodoService::new(users, todos)),
            tokens: web::Data::new(tokens),
        }
    }

    pub fn postgres(pool: PgPool, tokens: TokenService, hash_cost: u32) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTodoRepository::new(pool)),
            tokens,
            hash_cost,
        )
    }

    pub fn in_memory(store: InMemoryStore, tokens: TokenService, hash_cost: u32) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store), tokens, hash_cost)
    }

    /// Registers app data and all routes on an `App` (via `App::configure`).
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.todos.clone())
            .app_data(self.tokens.clone());
        routes::config(cfg);
    }
}

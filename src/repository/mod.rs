//! Persistence seams for users and todos.
//!
//! Services hold the repositories as `Arc<dyn ...>` so the same code runs on
//! top of Postgres ([`postgres`]) or the process-local [`memory::InMemoryStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewUser, PageRequest, Todo, TodoInput, User};

pub use memory::InMemoryStore;
pub use postgres::{PgTodoRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::DuplicateEmail` if the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

/// Every lookup and mutation is keyed by `(id, user_id)` so a todo owned by
/// someone else behaves exactly like a missing one.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn insert(&self, user_id: i64, input: &TodoInput) -> Result<Todo, AppError>;

    async fn find_by_id_and_user(&self, id: i64, user_id: i64) -> Result<Option<Todo>, AppError>;

    /// Whether a todo with this id exists for any user.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// The caller's todos, newest first.
    async fn find_page_by_user(
        &self,
        user_id: i64,
        completed: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Todo>, AppError>;

    async fn count_by_user(&self, user_id: i64, completed: Option<bool>) -> Result<i64, AppError>;

    /// Overwrites title, description and completed. `None` if no owned todo matched.
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: &TodoInput,
    ) -> Result<Option<Todo>, AppError>;

    /// Returns `false` if no owned todo matched.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}

use async_trait::async_trait;
use sqlx::PgPool;

use super::{TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewUser, PageRequest, Todo, TodoInput, User};

const USER_COLUMNS: &str = "id, name, email, password, role, created_at";
const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at, user_id";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        // A concurrent registration can slip past the service's email check;
        // the unique index turns that into AppError::DuplicateEmail.
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn insert(&self, user_id: i64, input: &TodoInput) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title, description, completed, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn find_by_id_and_user(&self, id: i64, user_id: i64) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_page_by_user(
        &self,
        user_id: i64,
        completed: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos
             WHERE user_id = $1 AND ($2::BOOLEAN IS NULL OR completed = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4",
            TODO_COLUMNS
        ))
        .bind(user_id)
        .bind(completed)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn count_by_user(&self, user_id: i64, completed: Option<bool>) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM todos
             WHERE user_id = $1 AND ($2::BOOLEAN IS NULL OR completed = $2)",
        )
        .bind(user_id)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: &TodoInput,
    ) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET title = $1, description = $2, completed = $3, updated_at = NOW()
             WHERE id = $4 AND user_id = $5
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A todo item as stored in the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Identifier of the owning user. Never changes after creation.
    pub user_id: i64,
}

/// Request body for both creating and updating a todo.
///
/// Updates are a full replace: a field left out of the body takes its default
/// (`description: null`, `completed: false`), not its previous value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255, message = "title must be between 1 and 255 characters"))]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

/// The representation of a todo returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TodoInput, TodoListQuery},
    services::TodoService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the authenticated user's todos, newest first.
///
/// ## Query Parameters:
/// - `page` (optional, default 1): 1-based page number.
/// - `limit` (optional, default 10, max 100): page size.
/// - `completed` (optional): only completed (`true`) or open (`false`) todos.
///
/// ## Responses:
/// - `200 OK`: `{"data": [...], "page": 1, "limit": 10, "total": 15}`.
/// - `400 Bad Request`: Invalid paging parameters.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn list_todos(
    todos: web::Data<TodoService>,
    user: AuthenticatedUser,
    query: web::Query<TodoListQuery>,
) -> Result<impl Responder, AppError> {
    let page = todos.list(&user, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Creates a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: The created todo.
/// - `400 Bad Request`: Malformed body or invalid title/description.
/// - `401 Unauthorized`: Missing or invalid token.
#[post("")]
pub async fn create_todo(
    todos: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    let todo = todos.create(&user, todo_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Fetches one todo.
///
/// ## Responses:
/// - `200 OK`: The todo.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `403 Forbidden`: The todo belongs to another user.
/// - `404 Not Found`: No todo with this id.
#[get("/{id}")]
pub async fn get_todo(
    todos: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let todo = todos.get(&user, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Replaces title, description and completed of a todo.
///
/// Fields left out of the body are reset to their defaults.
///
/// ## Responses:
/// - `200 OK`: The updated todo.
/// - `400 Bad Request`: Malformed body or invalid fields.
/// - `401 Unauthorized`, `403 Forbidden`, `404 Not Found`: As for `GET /todos/{id}`.
#[put("/{id}")]
pub async fn update_todo(
    todos: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i64>,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    let todo = todos
        .update(&user, todo_id.into_inner(), todo_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Deletes a todo.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `401 Unauthorized`, `403 Forbidden`, `404 Not Found`: As for `GET /todos/{id}`.
#[delete("/{id}")]
pub async fn delete_todo(
    todos: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    todos.delete(&user, todo_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

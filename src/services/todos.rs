use std::sync::Arc;

use log::{debug, info};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{PageRequest, PaginatedTodoResponse, TodoInput, TodoListQuery, TodoResponse, User};
use crate::repository::{TodoRepository, UserRepository};

/// CRUD over the caller's own todos.
///
/// Every method takes the caller explicitly and resolves it to a stored user
/// before touching any todo.
pub struct TodoService {
    users: Arc<dyn UserRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(users: Arc<dyn UserRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { users, todos }
    }

    async fn resolve_owner(&self, caller: &AuthenticatedUser) -> Result<User, AppError> {
        self.users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("User not found".into()))
    }

    /// Called after an owner-scoped lookup missed: tells a foreign todo apart
    /// from one that does not exist.
    async fn missing(&self, id: i64) -> AppError {
        match self.todos.exists(id).await {
            Ok(true) => AppError::AccessDenied,
            Ok(false) => AppError::NotFound,
            Err(err) => err,
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        input: TodoInput,
    ) -> Result<TodoResponse, AppError> {
        input.validate()?;
        let owner = self.resolve_owner(caller).await?;
        let todo = self.todos.insert(owner.id, &input).await?;
        info!("user {} created todo {}", owner.id, todo.id);
        Ok(todo.into())
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        query: TodoListQuery,
    ) -> Result<PaginatedTodoResponse, AppError> {
        let page = PageRequest::new(query.page, query.limit)?;
        let owner = self.resolve_owner(caller).await?;

        let total = self.todos.count_by_user(owner.id, query.completed).await?;
        let todos = self
            .todos
            .find_page_by_user(owner.id, query.completed, page)
            .await?;
        debug!(
            "user {} listed page {} ({} of {} todos)",
            owner.id,
            query.page,
            todos.len(),
            total
        );

        Ok(PaginatedTodoResponse {
            data: todos.into_iter().map(TodoResponse::from).collect(),
            page: query.page,
            limit: query.limit,
            total,
        })
    }

    pub async fn get(&self, caller: &AuthenticatedUser, id: i64) -> Result<TodoResponse, AppError> {
        let owner = self.resolve_owner(caller).await?;
        match self.todos.find_by_id_and_user(id, owner.id).await? {
            Some(todo) => Ok(todo.into()),
            None => Err(self.missing(id).await),
        }
    }

    /// Full replace of title, description and completed.
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: i64,
        input: TodoInput,
    ) -> Result<TodoResponse, AppError> {
        input.validate()?;
        let owner = self.resolve_owner(caller).await?;
        match self.todos.update(id, owner.id, &input).await? {
            Some(todo) => {
                info!("user {} updated todo {}", owner.id, id);
                Ok(todo.into())
            }
            None => Err(self.missing(id).await),
        }
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        let owner = self.resolve_owner(caller).await?;
        if self.todos.delete(id, owner.id).await? {
            info!("user {} deleted todo {}", owner.id, id);
            Ok(())
        } else {
            Err(self.missing(id).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repository::InMemoryStore;
    use pretty_assertions::assert_eq;

    struct Fixture {
        service: TodoService,
        alice: AuthenticatedUser,
        bob: AuthenticatedUser,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let mut callers = Vec::new();
        for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
            let user = UserRepository::insert(
                &store,
                NewUser::new(name.into(), email.into(), "hash".into()),
            )
            .await
            .unwrap();
            callers.push(AuthenticatedUser {
                id: user.id,
                email: user.email,
            });
        }
        let bob = callers.pop().unwrap();
        let alice = callers.pop().unwrap();
        Fixture {
            service: TodoService::new(Arc::new(store.clone()), Arc::new(store)),
            alice,
            bob,
        }
    }

    fn input(title: &str) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: Some("details".to_string()),
            completed: false,
        }
    }

    #[actix_rt::test]
    async fn test_create_and_get() {
        let f = fixture().await;
        let created = f.service.create(&f.alice, input("Buy milk")).await.unwrap();
        let fetched = f.service.get(&f.alice, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description.as_deref(), Some("details"));
    }

    #[actix_rt::test]
    async fn test_foreign_todo_is_forbidden_and_unknown_is_not_found() {
        let f = fixture().await;
        let todo = f.service.create(&f.alice, input("Alice only")).await.unwrap();

        assert!(matches!(f.service.get(&f.bob, todo.id).await, Err(AppError::AccessDenied)));
        assert!(matches!(
            f.service.update(&f.bob, todo.id, input("hijack")).await,
            Err(AppError::AccessDenied)
        ));
        assert!(matches!(f.service.delete(&f.bob, todo.id).await, Err(AppError::AccessDenied)));
        assert!(matches!(f.service.get(&f.alice, 9999).await, Err(AppError::NotFound)));

        let still_there = f.service.get(&f.alice, todo.id).await.unwrap();
        assert_eq!(still_there.title, "Alice only");
    }

    #[actix_rt::test]
    async fn test_update_is_full_replace() {
        let f = fixture().await;
        let todo = f
            .service
            .create(
                &f.alice,
                TodoInput {
                    title: "Original".into(),
                    description: Some("keep me?".into()),
                    completed: true,
                },
            )
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                &f.alice,
                todo.id,
                TodoInput {
                    title: "Renamed".into(),
                    description: None,
                    completed: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, None);
        assert!(!updated.completed);
        assert_eq!(updated.created_at, todo.created_at);
    }

    #[actix_rt::test]
    async fn test_list_pagination() {
        let f = fixture().await;
        for i in 1..=15 {
            f.service.create(&f.alice, input(&format!("todo {}", i))).await.unwrap();
        }
        f.service.create(&f.bob, input("bob's")).await.unwrap();

        let first = f
            .service
            .list(&f.alice, TodoListQuery { page: 1, limit: 10, completed: None })
            .await
            .unwrap();
        assert_eq!(first.data.len(), 10);
        assert_eq!(first.total, 15);
        assert_eq!(first.data[0].title, "todo 15");

        let second = f
            .service
            .list(&f.alice, TodoListQuery { page: 2, limit: 10, completed: None })
            .await
            .unwrap();
        assert_eq!(second.data.len(), 5);
        assert_eq!(second.page, 2);
        assert_eq!(second.total, 15);
        assert_eq!(second.data[4].title, "todo 1");

        let bob_page = f.service.list(&f.bob, TodoListQuery::default()).await.unwrap();
        assert_eq!(bob_page.total, 1);
    }

    #[actix_rt::test]
    async fn test_list_rejects_bad_page() {
        let f = fixture().await;
        let result = f
            .service
            .list(&f.alice, TodoListQuery { page: 0, limit: 10, completed: None })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_delete_then_get_is_not_found() {
        let f = fixture().await;
        let todo = f.service.create(&f.alice, input("short lived")).await.unwrap();
        f.service.delete(&f.alice, todo.id).await.unwrap();
        assert!(matches!(f.service.get(&f.alice, todo.id).await, Err(AppError::NotFound)));
        assert!(matches!(f.service.delete(&f.alice, todo.id).await, Err(AppError::NotFound)));
    }

    #[actix_rt::test]
    async fn test_unknown_caller_is_unauthenticated() {
        let f = fixture().await;
        let ghost = AuthenticatedUser {
            id: 404,
            email: "ghost@example.com".into(),
        };
        assert!(matches!(
            f.service.create(&ghost, input("boo")).await,
            Err(AppError::Unauthenticated(_))
        ));
    }
}

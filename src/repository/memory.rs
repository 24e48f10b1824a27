use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewUser, PageRequest, Todo, TodoInput, User};

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    next_user_id: i64,
    next_todo_id: i64,
}

/// Process-local store implementing both repositories.
///
/// Clones share the same data. Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

fn matches_filter(todo: &Todo, user_id: i64, completed: Option<bool>) -> bool {
    todo.user_id == user_id && completed.map_or(true, |c| todo.completed == c)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn insert(&self, user_id: i64, input: &TodoInput) -> Result<Todo, AppError> {
        let mut state = self.state.write().await;
        state.next_todo_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: state.next_todo_id,
            title: input.title.clone(),
            description: input.description.clone(),
            completed: input.completed,
            created_at: now,
            updated_at: now,
            user_id,
        };
        state.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id_and_user(&self, id: i64, user_id: i64) -> Result<Option<Todo>, AppError> {
        let state = self.state.read().await;
        Ok(state.todos.get(&id).filter(|t| t.user_id == user_id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.state.read().await.todos.contains_key(&id))
    }

    async fn find_page_by_user(
        &self,
        user_id: i64,
        completed: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Todo>, AppError> {
        let state = self.state.read().await;
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|t| matches_filter(t, user_id, completed))
            .cloned()
            .collect();
        todos.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(todos
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_by_user(&self, user_id: i64, completed: Option<bool>) -> Result<i64, AppError> {
        let state = self.state.read().await;
        let total = state
            .todos
            .values()
            .filter(|t| matches_filter(t, user_id, completed))
            .count();
        Ok(total as i64)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: &TodoInput,
    ) -> Result<Option<Todo>, AppError> {
        let mut state = self.state.write().await;
        let Some(todo) = state.todos.get_mut(&id).filter(|t| t.user_id == user_id) else {
            return Ok(None);
        };
        todo.title = input.title.clone();
        todo.description = input.description.clone();
        todo.completed = input.completed;
        todo.updated_at = Utc::now();
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        match state.todos.get(&id) {
            Some(todo) if todo.user_id == user_id => {
                state.todos.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, completed: bool) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: None,
            completed,
        }
    }

    async fn store_with_user() -> (InMemoryStore, User) {
        let store = InMemoryStore::new();
        let user = UserRepository::insert(
            &store,
            NewUser::new("Ada".into(), "ada@example.com".into(), "hash".into()),
        )
        .await
        .unwrap();
        (store, user)
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_rejected() {
        let (store, _) = store_with_user().await;
        let again = UserRepository::insert(
            &store,
            NewUser::new("Other".into(), "ada@example.com".into(), "hash".into()),
        )
        .await;
        assert!(matches!(again, Err(AppError::DuplicateEmail)));
        assert_eq!(store.user_count().await, 1);
    }

    #[actix_rt::test]
    async fn test_lookup_is_scoped_to_owner() {
        let (store, user) = store_with_user().await;
        let todo = TodoRepository::insert(&store, user.id, &input("mine", false))
            .await
            .unwrap();

        assert!(store.find_by_id_and_user(todo.id, user.id).await.unwrap().is_some());
        assert!(store.find_by_id_and_user(todo.id, user.id + 1).await.unwrap().is_none());
        assert!(store.exists(todo.id).await.unwrap());
        assert!(store.update(todo.id, user.id + 1, &input("x", true)).await.unwrap().is_none());
        assert!(!store.delete(todo.id, user.id + 1).await.unwrap());
        assert!(store.delete(todo.id, user.id).await.unwrap());
        assert!(!store.exists(todo.id).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_page_is_newest_first() {
        let (store, user) = store_with_user().await;
        for i in 0..5 {
            TodoRepository::insert(&store, user.id, &input(&format!("todo {}", i), i % 2 == 0))
                .await
                .unwrap();
        }

        let page = PageRequest::new(1, 2).unwrap();
        let todos = store.find_page_by_user(user.id, None, page).await.unwrap();
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["todo 4", "todo 3"]);

        let page = PageRequest::new(3, 2).unwrap();
        let todos = store.find_page_by_user(user.id, None, page).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "todo 0");

        assert_eq!(store.count_by_user(user.id, None).await.unwrap(), 5);
        assert_eq!(store.count_by_user(user.id, Some(true)).await.unwrap(), 3);
        assert_eq!(store.count_by_user(user.id + 1, None).await.unwrap(), 0);
    }
}

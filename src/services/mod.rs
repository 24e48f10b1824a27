pub mod auth;
pub mod todos;

pub use auth::AuthService;
pub use todos::TodoService;

use crate::error::AppError;

/// Runs CPU-bound work (bcrypt) off the async worker threads.
async fn run_blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}

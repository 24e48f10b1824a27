pub mod page;
pub mod todo;
pub mod user;

pub use page::{PageRequest, PaginatedTodoResponse, TodoListQuery};
pub use todo::{Todo, TodoInput, TodoResponse};
pub use user::{NewUser, User, DEFAULT_ROLE};

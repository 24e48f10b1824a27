#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Personal todo lists over REST: registration and JWT login, plus create, list,"]
#![doc = "read, update and delete of todos scoped to the authenticated user. The binary"]
#![doc = "(`main.rs`) reads the configuration, picks a store and serves the routes."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use crate::error::AppError;
pub use crate::state::AppState;

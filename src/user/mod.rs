//! Users of the application and how they log in and register.

mod models;
mod service;

pub use models::{User, UserBuilder, UserID};
pub use service::UserService;

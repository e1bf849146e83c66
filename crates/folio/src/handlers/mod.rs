pub mod admin;
pub mod auth;
pub mod authz;
pub mod blogs;
pub mod error;
pub mod health;
pub mod projects;

pub use error::AppError;

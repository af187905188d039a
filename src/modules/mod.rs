pub mod auth;
pub mod business;
pub mod role;
pub mod user;

pub mod controller;
pub mod guard;
pub mod routes;
pub mod schema;
pub mod service;

pub use routes::auth_routes;

//! Authentication Module
//! Mission: Credential storage and bearer-token issuance for the API

pub mod api;
pub mod middleware;
pub mod models;
pub mod password;
pub mod token;

pub use middleware::{auth_middleware, optional_auth_middleware};
pub use token::TokenService;

pub mod auth;
pub mod jwks;
pub mod user;

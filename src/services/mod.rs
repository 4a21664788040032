pub mod jwks_service;
pub mod jwt_service;
pub mod key_service;
pub mod resolver;

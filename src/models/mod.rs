pub mod jwt;
pub mod result;

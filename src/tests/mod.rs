mod helpers;
mod jwks;

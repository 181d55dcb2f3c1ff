pub mod models;
pub mod pkce;

pub mod chunk;
pub mod models;
pub mod session;

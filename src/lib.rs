pub mod config;
pub mod export;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validate;

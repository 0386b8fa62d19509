pub mod api;
pub mod api_doc;
pub mod auth;
pub mod config;
pub mod server;
pub mod session;
pub mod ui;

pub use config::Config;
pub use server::run_server;

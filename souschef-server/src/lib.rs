mod config;
mod routes;

pub use config::AppConfig;
pub use routes::{cors_layer, router};

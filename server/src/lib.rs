pub mod backend;

pub use backend::{config::AppConfig, create_router, initialize_backend, AppState};

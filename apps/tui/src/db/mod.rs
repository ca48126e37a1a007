pub mod migrations;
pub mod models;
pub mod queries;

pub use migrations::{create_database_pool, setup_database};
pub use models::PreferenceKey;
pub use queries::{get_preference, set_preference};

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod format;
pub mod middleware;
pub mod store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use middleware::auth::Session;

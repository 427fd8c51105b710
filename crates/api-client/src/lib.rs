pub mod client;
pub mod error;
pub mod retry;

pub use client::{ApiClient, SessionListQuery};
pub use error::ApiError;
pub use retry::RetryConfig;

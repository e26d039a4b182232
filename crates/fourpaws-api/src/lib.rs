// fourpaws-api: Async Rust client for the FourPaws REST backend

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ApiClient, PLACEHOLDER_IMAGE};
pub use error::Error;
pub use transport::ApiConfig;

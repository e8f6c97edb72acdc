// client/src/lib.rs

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;

pub use api::{ClinicApi, LoginRequest};
pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use http::HttpClinicApi;

//! Form service client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::{FormService, LoginOutcome};

#[cfg(test)]
pub use traits::MockFormService;

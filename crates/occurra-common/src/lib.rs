//! occurra-common — Shared error type and HTTP client used across all Occurra crates.

pub mod error;
pub mod sandbox;

pub use error::{OccurraError, Result};
pub use sandbox::SandboxClient;

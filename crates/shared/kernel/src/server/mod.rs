//! Shared HTTP plumbing: application state, the JSON error envelope and system routes.

mod error;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ErrorBody};
pub use health::HealthResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};

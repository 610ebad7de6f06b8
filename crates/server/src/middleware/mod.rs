//! HTTP middleware

pub mod metrics;
pub mod request_id;

pub use metrics::{install_recorder, metrics_middleware};
pub use request_id::{RequestId, request_id_middleware};

//! Explicit registration of generation interceptors.

pub mod message_timestamp;
pub mod registry;

pub use message_timestamp::MessageTimestampInterceptor;
pub use registry::{InterceptOutcome, InterceptorRegistry};

pub mod middleware;
pub mod telegram;
pub mod tracing;

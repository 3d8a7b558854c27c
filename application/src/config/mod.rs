//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-call timeout and retry schedule for gateway dispatch

pub mod execution_params;

pub use execution_params::{ExecutionParams, RetryPolicy};

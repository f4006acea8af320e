//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Access log: one line per request, including rejected ones
//! 2. Rate limiter: per-client fixed window, rejects before handlers run

pub mod access_log;
pub mod rate;

//! # Models
//!
//! Row types and the SQL that reads and writes them.

pub mod task;

pub use task::{Task, TaskCounts};

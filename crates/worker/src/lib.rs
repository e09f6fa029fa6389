//! Scheduled feed ingestion: runs the program catalog sync followed by the
//! action sync on a fixed interval.

pub mod config;
pub mod scheduler;

//! Client for the TimeOne affiliate-performance feed.
//!
//! Provides vendor configuration, an HTTP client with bounded retry, and
//! structural parsing of the program catalog and action XML documents into
//! typed records.

pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod parser;
pub mod retry;

pub use client::{ActionQuery, ActionStatusFilter, TimeOneClient};
pub use config::TimeOneConfig;
pub use error::FeedError;
pub use parser::{FeedAction, FeedProgram};

//! Domain logic for the RDV tracker.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock reads.
//! Callers fetch raw counts from the store and pass `now` explicitly.

pub mod error;
pub mod financial;
pub mod monitor;
pub mod planning;
pub mod progress;
pub mod scoring;
pub mod status;
pub mod time_window;
pub mod types;

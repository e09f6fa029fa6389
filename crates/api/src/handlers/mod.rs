//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `rdvtrack_db` and the pure
//! calculators in `rdvtrack_core`, and map errors via [`crate::error::AppError`].

pub mod alert;
pub mod appointment;
pub mod dashboard;
pub mod planning;
pub mod project;
pub mod sync;

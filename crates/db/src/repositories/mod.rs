//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod appointment_repo;
pub mod planning_repo;
pub mod project_repo;

pub use alert_repo::AlertRepo;
pub use appointment_repo::AppointmentRepo;
pub use planning_repo::PlanningRepo;
pub use project_repo::ProjectRepo;

//! Pages
//!
//! Top-level page components for each route.

pub mod attendance;
pub mod events;
pub mod reporting;
pub mod resources;

pub use attendance::Attendance;
pub use events::Events;
pub use reporting::Reporting;
pub use resources::Resources;

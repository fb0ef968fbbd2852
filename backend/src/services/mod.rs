//! External collaborators consumed by the core services.

pub mod google;

//! Collection of general utility functions.
//!
//! This module serves as a repository for small, reusable helpers that do not
//! fit into other specific domain modules.

pub mod generate_random_string;
pub mod jwt;
pub mod password;

//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the catalog and community
//! domains, excluding core authentication routes which are handled
//! separately.

pub mod comment;
pub mod common;
pub mod product;
pub mod review;

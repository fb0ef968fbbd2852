//! Data-access layer: one repository per entity.

pub mod comment_repository;
pub mod product_repository;
pub mod review_repository;
pub mod user_repository;

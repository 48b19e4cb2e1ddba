//! DTOs for talking to the management and data-index services

pub mod bulk;
pub mod job;
pub mod query;

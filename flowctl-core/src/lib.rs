//! Flowctl Core
//!
//! Core types and abstractions for the flowctl management toolkit.
//!
//! This crate contains:
//! - Domain types: process instances, jobs and their lifecycle states
//! - DTOs: request/response shapes for the management and data-index surfaces
//! - Selection: the checked-state model that drives bulk operations

pub mod domain;
pub mod dto;
pub mod selection;
